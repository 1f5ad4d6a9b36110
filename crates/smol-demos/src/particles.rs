//! A fountain of fading particles that follows the pointer.

use smol_core::{Canvas, CanvasHost, HandlerResult, Sketch, Surface, Vector};

pub const PARTICLE_COUNT: usize = 150;

#[derive(Debug, Clone)]
pub struct Particle {
    vel: Vector,
    pub x: f64,
    pub y: f64,
    r: f64,
    g: f64,
    b: f64,
    pub radius: f64,
}

impl Particle {
    fn spawn<S: Surface>(canvas: &mut Canvas<S>) -> Result<Self, smol_core::SketchError> {
        let mut p = Self {
            vel: Vector::zeros(2),
            x: 0.0,
            y: 0.0,
            r: 0.0,
            g: 0.0,
            b: 0.0,
            radius: 0.0,
        };
        p.reset(canvas)?;
        Ok(p)
    }

    fn reset<S: Surface>(&mut self, c: &mut Canvas<S>) -> HandlerResult {
        self.vel.set_x(c.random(&[-80.0, 80.0])?)?;
        self.vel.set_y(c.random(&[-80.0, 80.0])?)?;
        self.x = c.mouse_x();
        self.y = c.mouse_y();
        self.r = c.random(&[0.7, 1.0])?;
        self.g = c.random(&[0.7, 1.0])?;
        self.b = c.random(&[0.7, 1.0])?;
        self.radius = c.random(&[20.0])?;
        Ok(())
    }

    /// Off the surface or fully shrunk.
    pub fn is_dead(&self, width: f64, height: f64) -> bool {
        self.x < 0.0 || self.x > width || self.y < 0.0 || self.y > height || self.radius < 0.0
    }

    fn update<S: Surface>(&mut self, c: &mut Canvas<S>, dt: f64) -> HandlerResult {
        self.x += self.vel.x()? * dt;
        self.y += self.vel.y()? * dt;
        self.radius -= 5.0 * dt;
        if self.is_dead(f64::from(c.width()), f64::from(c.height())) {
            self.reset(c)?;
        }
        Ok(())
    }

    fn draw<S: Surface>(&self, c: &mut Canvas<S>) {
        c.fill_rgba(self.r, self.g, self.b, 0.6);
        c.circle(self.x - self.radius / 2.0, self.y - self.radius / 2.0, self.radius);
    }
}

#[derive(Debug, Default)]
pub struct Particles {
    particles: Vec<Particle>,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

impl<S: Surface> Sketch<S> for Particles {
    fn setup(&mut self, host: &mut CanvasHost<S>) -> HandlerResult {
        host.fill_window();
        host.font("monospace", 20.0);
        let canvas = host.canvas_mut();
        self.particles = (0..PARTICLE_COUNT)
            .map(|_| Particle::spawn(canvas))
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    fn update(&mut self, canvas: &mut Canvas<S>, dt: f64) -> HandlerResult {
        for p in &mut self.particles {
            p.update(canvas, dt)?;
        }
        Ok(())
    }

    fn draw(&mut self, c: &mut Canvas<S>) -> HandlerResult {
        c.background(0.0);
        c.fill_rgb(1.0, 1.0, 1.0);
        c.stroke_rgb(1.0, 1.0, 1.0);
        let fps = format!("FPS: {}", c.fps().round());
        c.text(10.0, 10.0, &fps);
        c.stroke_weight(0.5);
        for p in &self.particles {
            p.draw(c);
        }
        Ok(())
    }
}
