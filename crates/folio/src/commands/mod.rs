//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod render;

pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;

use folio_config::Config;
use folio_renderer::{ReferenceRoutes, RenderOptions, VideoHosts};

use crate::error::CliError;

/// Build renderer options from loaded configuration.
///
/// Configured routes already include the built-in `article` route, so they
/// replace the renderer defaults. Configured hosts extend the default table.
pub(crate) fn render_options(config: &Config) -> Result<RenderOptions, CliError> {
    let routes = config
        .render
        .routes
        .iter()
        .fold(ReferenceRoutes::empty(), |routes, (document_type, prefix)| {
            routes.with_route(document_type.clone(), prefix)
        });

    let mut hosts = VideoHosts::default();
    for (host, provider) in &config.embed.hosts {
        hosts = hosts.with_host(host, provider.parse()?);
    }

    let mut options = RenderOptions::new()
        .with_routes(routes)
        .with_video_hosts(hosts);
    if let Some(alt) = &config.render.fallback_alt {
        options = options.with_fallback_alt(alt.clone());
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_renderer::VideoProvider;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_options_defaults() {
        let options = render_options(&Config::default()).unwrap();
        assert_eq!(options, RenderOptions::default());
    }

    #[test]
    fn test_render_options_from_config() {
        let mut config = Config::default();
        config.render.fallback_alt = Some("Cover".to_owned());
        config
            .render
            .routes
            .insert("project".to_owned(), "/work".to_owned());
        config
            .embed
            .hosts
            .insert("music.youtube.com".to_owned(), "youtube".to_owned());

        let options = render_options(&config).unwrap();

        assert_eq!(options.fallback_alt.as_deref(), Some("Cover"));
        assert_eq!(options.routes.prefix("project"), Some("/work"));
        assert_eq!(options.routes.prefix("article"), Some("/articles"));
        assert_eq!(
            options.video_hosts.provider("music.youtube.com"),
            Some(VideoProvider::YouTube)
        );
        assert_eq!(
            options.video_hosts.provider("youtu.be"),
            Some(VideoProvider::YouTubeShort)
        );
    }

    #[test]
    fn test_render_options_unknown_provider() {
        let mut config = Config::default();
        config
            .embed
            .hosts
            .insert("videos.example.com".to_owned(), "dailymotion".to_owned());

        let err = render_options(&config).unwrap_err();

        assert!(matches!(err, CliError::Provider(_)), "got {err:?}");
    }
}
