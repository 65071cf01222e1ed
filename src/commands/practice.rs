//! `segtype practice`: the interactive session

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;

use segtype::runtime::{PracticeSession, SessionOptions};
use segtype::tui::PracticeApp;
use segtype::Config;

use super::resolve_media;

#[cfg(not(tarpaulin_include))]
pub fn handle(media: &str, dir: Option<&Path>, config: &Config) -> Result<()> {
    let (source, media_id) = resolve_media(media, dir, config);
    info!(media_id = %media_id, dir = %source.dir().display(), "starting practice session");

    let mut session = PracticeSession::new(source, SessionOptions::from(config), Instant::now());
    session.open(&media_id);
    PracticeApp::new(session).run()
}
