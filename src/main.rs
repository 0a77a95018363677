//! Arcade Physics entry point
//!
//! Runs a headless brick-breaker through the fixed-timestep driver and logs
//! how the rally goes. Pass a settings JSON path as the first argument to
//! override the engine defaults.

mod breakout {
    use arcade_physics::Settings;
    use arcade_physics::color::Color;
    use arcade_physics::sim::{
        BodyId, FixedStepper, Polygon, RigidBody, Scene, Vector, create_collision,
        create_physics_collision, elastic_impulse,
    };

    const WIDTH: f64 = 1000.0;
    const HEIGHT: f64 = 500.0;
    const WALL_THICKNESS: f64 = 5.0;

    const BRICK_WIDTH: f64 = 120.0;
    const BRICK_HEIGHT: f64 = 40.0;
    const BRICK_GAP: f64 = 3.25;
    const BRICKS_PER_ROW: usize = 8;
    const BRICK_ROWS: usize = 3;

    const PADDLE_Y: f64 = 28.25;
    const PADDLE_SPEED: f64 = 500.0;

    const BALL_RADIUS: f64 = 15.0;
    const BALL_SIDES: usize = 20;
    const BALL_MASS: f64 = 2.0;
    const BALL_VELOCITY: Vector = Vector::new(200.0, 300.0);
    const ELASTICITY: f64 = 1.0;

    /// Frame time the headless loop pretends to render at
    const FRAME_DT: f64 = 1.0 / 60.0;
    const MAX_FRAMES: usize = 60 * 120;

    const BRICK_COLORS: [Color; 8] = [
        Color::new(1.0, 0.0, 1.0),
        Color::new(1.0, 0.0, 0.0),
        Color::new(1.0, 1.0, 0.0),
        Color::new(0.5, 1.0, 0.0),
        Color::new(0.0, 1.0, 0.0),
        Color::new(0.0, 1.0, 1.0),
        Color::new(0.0, 0.0, 1.0),
        Color::new(0.5, 0.0, 1.0),
    ];

    /// Payload attached to every body
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum BodyKind {
        Wall,
        Paddle,
        Brick { row: usize },
    }

    struct Breakout {
        scene: Scene,
        stepper: FixedStepper,
        ball: BodyId,
        paddle: BodyId,
    }

    impl Breakout {
        fn new(settings: Settings) -> Self {
            let stepper = FixedStepper::from_settings(&settings);
            let mut scene = Scene::with_settings(settings);

            let paddle = scene.add_body(RigidBody::with_info(
                Polygon::rectangle(Vector::new(WIDTH / 2.0, PADDLE_Y), BRICK_WIDTH, BRICK_HEIGHT),
                f64::INFINITY,
                Color::BLUE,
                BodyKind::Paddle,
            ));

            let mut ball_body = scene.make_body(
                Polygon::regular(Vector::new(WIDTH / 2.0, PADDLE_Y + BRICK_HEIGHT), BALL_RADIUS, BALL_SIDES),
                BALL_MASS,
                Color::BLUE,
            );
            ball_body.set_velocity(BALL_VELOCITY);
            let ball = scene.add_body(ball_body);
            create_physics_collision(&mut scene, ELASTICITY, ball, paddle);

            let walls = [
                Polygon::rectangle(
                    Vector::new(WALL_THICKNESS / 2.0, HEIGHT / 2.0),
                    WALL_THICKNESS,
                    HEIGHT,
                ),
                Polygon::rectangle(
                    Vector::new(WIDTH - WALL_THICKNESS / 2.0, HEIGHT / 2.0),
                    WALL_THICKNESS,
                    HEIGHT,
                ),
                Polygon::rectangle(
                    Vector::new(WIDTH / 2.0, HEIGHT - WALL_THICKNESS / 2.0),
                    WIDTH,
                    WALL_THICKNESS,
                ),
            ];
            for shape in walls {
                let wall = scene.add_body(RigidBody::with_info(
                    shape,
                    f64::INFINITY,
                    Color::WHITE,
                    BodyKind::Wall,
                ));
                create_physics_collision(&mut scene, ELASTICITY, ball, wall);
            }

            for row in 0..BRICK_ROWS {
                for column in 0..BRICKS_PER_ROW {
                    let center = Vector::new(
                        WALL_THICKNESS + BRICK_GAP + BRICK_WIDTH / 2.0
                            + column as f64 * (BRICK_WIDTH + BRICK_GAP),
                        HEIGHT
                            - WALL_THICKNESS
                            - BRICK_GAP
                            - BRICK_HEIGHT / 2.0
                            - row as f64 * (BRICK_HEIGHT + BRICK_GAP),
                    );
                    let brick = scene.add_body(RigidBody::with_info(
                        Polygon::rectangle(center, BRICK_WIDTH, BRICK_HEIGHT),
                        f64::INFINITY,
                        BRICK_COLORS[column % BRICK_COLORS.len()],
                        BodyKind::Brick { row },
                    ));
                    create_collision(&mut scene, ball, brick, |ball, brick, axis| {
                        let impulse = elastic_impulse(ball, brick, axis, ELASTICITY);
                        ball.add_impulse(impulse);
                        if let Some(BodyKind::Brick { row }) = brick.info::<BodyKind>() {
                            log::debug!("Brick in row {} broken", row);
                        }
                        brick.remove();
                    });
                }
            }

            log::info!(
                "Breakout ready: {} bodies, {} force creators",
                scene.body_count(),
                scene.force_creator_count()
            );
            Self {
                scene,
                stepper,
                ball,
                paddle,
            }
        }

        fn bricks_left(&self) -> usize {
            self.scene
                .bodies()
                .iter()
                .filter(|(_, body)| matches!(body.info::<BodyKind>(), Some(BodyKind::Brick { .. })))
                .count()
        }

        /// Move the paddle toward the ball, standing in for player input
        fn steer_paddle(&mut self) {
            let Some(ball_x) = self.scene.body_by_id(self.ball).map(|b| b.centroid().x) else {
                return;
            };
            let Some(paddle) = self.scene.body_by_id_mut(self.paddle) else {
                return;
            };
            let dx = ball_x - paddle.centroid().x;
            let half = BRICK_WIDTH / 2.0;
            let speed = if dx.abs() < 5.0 { 0.0 } else { PADDLE_SPEED.copysign(dx) };
            let x = paddle.centroid().x;
            let blocked = (speed < 0.0 && x - half <= WALL_THICKNESS)
                || (speed > 0.0 && x + half >= WIDTH - WALL_THICKNESS);
            paddle.set_velocity(Vector::new(if blocked { 0.0 } else { speed }, 0.0));
        }

        fn ball_lost(&self) -> bool {
            self.scene
                .body_by_id(self.ball)
                .is_none_or(|ball| ball.centroid().y < -BALL_RADIUS)
        }

        fn run(&mut self) {
            let total_bricks = self.bricks_left();
            for frame in 0..MAX_FRAMES {
                self.steer_paddle();
                self.stepper.advance(&mut self.scene, FRAME_DT);

                if frame % 60 == 0 {
                    let ball = self.scene.body_by_id(self.ball);
                    log::debug!(
                        "t={:.1}s ball at {:?}, {} bricks left",
                        frame as f64 * FRAME_DT,
                        ball.map(RigidBody::centroid),
                        self.bricks_left()
                    );
                }

                if self.ball_lost() {
                    log::info!("Ball lost after {:.1}s", frame as f64 * FRAME_DT);
                    break;
                }
                if self.bricks_left() == 0 {
                    log::info!("All bricks cleared after {:.1}s", frame as f64 * FRAME_DT);
                    break;
                }
            }

            log::info!(
                "Finished after {} ticks: {}/{} bricks broken",
                self.scene.time_ticks(),
                total_bricks - self.bricks_left(),
                total_bricks
            );
        }
    }

    pub fn run() {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };
        Breakout::new(settings).run();
    }
}

fn main() {
    env_logger::init();
    log::info!("Arcade Physics (native) starting...");
    breakout::run();
}
