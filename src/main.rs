//! Space Rocks entry point
//!
//! Initializes logging and settings, then runs the game loop on the SDL2
//! frontend.

use space_rocks::Settings;

#[cfg(feature = "sdl")]
fn main() -> space_rocks::Result<()> {
    use space_rocks::game::Game;
    use space_rocks::platform::sdl::SdlContext;

    init_logging();
    log::info!("Space Rocks starting...");
    let settings = Settings::load();

    let mut context = SdlContext::new("Space Rocks", settings.window_scale)?;
    let mut game = Game::new(context.frontend(), &settings)?;
    game.run()
}

#[cfg(not(feature = "sdl"))]
fn main() {
    init_logging();
    log::info!("Space Rocks starting...");
    let settings = Settings::load();
    log::error!(
        "Built without a window backend - rebuild with `--features sdl` (assets expected in {})",
        settings.asset_dir.display()
    );
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
