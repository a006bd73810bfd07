//! Marble Maze entry point
//!
//! Native: generates a maze, prints it and reports the stored best time.
//! Web: exports a `MazeGame` handle the page's physics engine drives.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use glam::Vec2;
    use wasm_bindgen::prelude::*;

    use marble_maze::persistence::LocalStore;
    use marble_maze::platform::SystemClock;
    use marble_maze::world::{HeadlessWorld, World};
    use marble_maze::{BodyLabel, Command, GamePhase, GameSession, Maze, Settings};

    /// Game handle for the page
    ///
    /// The page builds its physics bodies from `bodies_json`, forwards
    /// collision-start pairs and key codes, and mirrors the ball velocity and
    /// the released flag back into its engine.
    #[wasm_bindgen]
    pub struct MazeGame {
        session: GameSession<HeadlessWorld, LocalStore, SystemClock>,
    }

    #[wasm_bindgen]
    impl MazeGame {
        #[wasm_bindgen(constructor)]
        pub fn new(grid_size: u32, width: f32, height: f32) -> Result<MazeGame, JsValue> {
            let mut settings = Settings::load();
            settings.grid_size = grid_size;
            settings.arena_width = width;
            settings.arena_height = height;
            settings.save();

            let dims = settings
                .dimensions()
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            let maze = Maze::generate_with(dims, &mut settings.rng());
            log::info!("Maze {}x{} ready", dims.rows(), dims.cols());

            let session = GameSession::new(
                &maze,
                Vec2::new(width, height),
                HeadlessWorld::new(),
                LocalStore,
                SystemClock::new(),
            );
            Ok(MazeGame { session })
        }

        /// Body placement commands as JSON
        pub fn bodies_json(&self) -> String {
            serde_json::to_string(&self.session.layout().bodies).unwrap_or_default()
        }

        pub fn start(&mut self) {
            self.session.on_command(Command::Start);
        }

        /// Feed a key code (W/A/S/D move the ball)
        pub fn key(&mut self, key_code: u32) {
            if let Some(command) = Command::from_key(key_code) {
                self.session.on_command(command);
            }
        }

        /// Set the ball velocity reported by the engine before a key is applied
        pub fn sync_ball_velocity(&mut self, x: f32, y: f32) {
            let world = self.session.world_mut();
            if let Some(ball) = world
                .bodies
                .iter()
                .position(|b| b.spec.label() == BodyLabel::Ball)
            {
                world.set_velocity(ball, Vec2::new(x, y));
            }
        }

        /// Ball velocity after the latest move command, as `[x, y]`
        pub fn ball_velocity(&self) -> Vec<f32> {
            self.session
                .world()
                .with_label(BodyLabel::Ball)
                .next()
                .map(|b| vec![b.velocity.x, b.velocity.y])
                .unwrap_or_default()
        }

        /// Collision-start pair; returns the elapsed seconds when it wins the game
        pub fn collision(&mut self, a: &str, b: &str) -> Option<f64> {
            let (a, b) = (BodyLabel::from_str(a)?, BodyLabel::from_str(b)?);
            self.session
                .on_collision(a, b)
                .map(|report| report.elapsed_secs as f64)
        }

        /// Whether walls have been released
        pub fn released(&self) -> bool {
            self.session.phase() == GamePhase::Won
        }

        pub fn best_time(&self) -> Option<f64> {
            self.session.best_time_secs().map(|s| s as f64)
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }
        log::info!("Marble Maze starting...");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Marble Maze (native) starting...");

    let mut settings = marble_maze::Settings::load();
    let mut args = std::env::args().skip(1);
    if let Some(arg) = args.next() {
        match arg.parse() {
            Ok(size) => settings.grid_size = size,
            Err(_) => usage(&format!("grid size must be a whole number, got {arg:?}")),
        }
    }
    if let Some(arg) = args.next() {
        match arg.parse() {
            Ok(seed) => settings.seed = Some(seed),
            Err(_) => usage(&format!("seed must be a whole number, got {arg:?}")),
        }
    }

    if let Err(err) = native::run(&settings) {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn usage(problem: &str) -> ! {
    eprintln!("error: {problem}");
    eprintln!("usage: marble-maze [grid_size] [seed]");
    std::process::exit(2);
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use marble_maze::persistence::JsonFileStore;
    use marble_maze::platform::SystemClock;
    use marble_maze::world::HeadlessWorld;
    use marble_maze::{GameSession, Maze, Settings};

    pub fn run(settings: &Settings) -> marble_maze::Result<()> {
        let dims = settings.dimensions()?;
        let seed = settings.resolve_seed();
        let maze = Maze::generate_with(dims, &mut Pcg32::seed_from_u64(seed));

        println!("{}x{} maze, seed {seed}", dims.rows(), dims.cols());
        print!("{maze}");

        let session = GameSession::new(
            &maze,
            settings.arena(),
            HeadlessWorld::new(),
            JsonFileStore::new(JsonFileStore::DEFAULT_PATH),
            SystemClock::new(),
        );
        let layout = session.layout();
        println!(
            "{} bodies ({} walls), cell {}x{}",
            layout.bodies.len(),
            layout.wall_count(),
            layout.unit.x,
            layout.unit.y
        );
        match session.best_time_secs() {
            Some(best) => println!("Best time: {best}s"),
            None => println!("No score available"),
        }
        Ok(())
    }
}
