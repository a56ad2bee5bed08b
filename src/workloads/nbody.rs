//! N-body simulation of the Jovian planets.
//!
//! Each run advances the system 1000 steps of `dt = 0.01`. The checksum mixes
//! the energy before the first step with the current energy.

use std::f64::consts::PI;

use crate::checksum::checksum_f64;
use crate::prng::Prng;
use crate::workload::Workload;

const SOLAR_MASS: f64 = 4.0 * PI * PI;
const DAYS_PER_YEAR: f64 = 365.24;
const STEPS_PER_RUN: usize = 1000;
const DT: f64 = 0.01;

#[derive(Debug, Clone, Copy)]
struct Planet {
    x: f64,
    y: f64,
    z: f64,
    vx: f64,
    vy: f64,
    vz: f64,
    mass: f64,
}

impl Planet {
    fn new(pos: [f64; 3], vel: [f64; 3], mass: f64) -> Self {
        Self {
            x: pos[0],
            y: pos[1],
            z: pos[2],
            vx: vel[0] * DAYS_PER_YEAR,
            vy: vel[1] * DAYS_PER_YEAR,
            vz: vel[2] * DAYS_PER_YEAR,
            mass: mass * SOLAR_MASS,
        }
    }
}

fn create_bodies() -> [Planet; 5] {
    [
        // sun
        Planet::new([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 1.0),
        // jupiter
        Planet::new(
            [4.84143144246472090e+00, -1.16032004402742839e+00, -1.03622044471123109e-01],
            [1.66007664274403694e-03, 7.69901118419740425e-03, -6.90460016972063023e-05],
            9.54791938424326609e-04,
        ),
        // saturn
        Planet::new(
            [8.34336671824457987e+00, 4.12479856412430479e+00, -4.03523417114321381e-01],
            [-2.76742510726862411e-03, 4.99852801234917238e-03, 2.30417297573763929e-05],
            2.85885980666130812e-04,
        ),
        // uranus
        Planet::new(
            [1.28943695621391310e+01, -1.51111514016986312e+01, -2.23307578892655734e-01],
            [2.96460137564761618e-03, 2.37847173959480950e-03, -2.96589568540237556e-05],
            4.36624404335156298e-05,
        ),
        // neptune
        Planet::new(
            [1.53796971148509165e+01, -2.59193146099879641e+01, 1.79258772950371181e-01],
            [2.68067772490389322e-03, 1.62824170038242295e-03, -9.51592254519715870e-05],
            5.15138902046611451e-05,
        ),
    ]
}

fn energy(bodies: &[Planet]) -> f64 {
    let mut e = 0.0;
    for (i, b) in bodies.iter().enumerate() {
        e += 0.5 * b.mass * (b.vx * b.vx + b.vy * b.vy + b.vz * b.vz);
        for b2 in &bodies[i + 1..] {
            let dx = b.x - b2.x;
            let dy = b.y - b2.y;
            let dz = b.z - b2.z;
            let distance = (dx * dx + dy * dy + dz * dz).sqrt();
            e -= (b.mass * b2.mass) / distance;
        }
    }
    e
}

fn offset_momentum(bodies: &mut [Planet]) {
    let (mut px, mut py, mut pz) = (0.0, 0.0, 0.0);
    for b in bodies.iter() {
        px += b.vx * b.mass;
        py += b.vy * b.mass;
        pz += b.vz * b.mass;
    }
    if let Some(sun) = bodies.first_mut() {
        sun.vx = -px / SOLAR_MASS;
        sun.vy = -py / SOLAR_MASS;
        sun.vz = -pz / SOLAR_MASS;
    }
}

fn advance(bodies: &mut [Planet], dt: f64) {
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let b = &mut head[i];
        for b2 in tail.iter_mut() {
            let dx = b.x - b2.x;
            let dy = b.y - b2.y;
            let dz = b.z - b2.z;

            let distance = (dx * dx + dy * dy + dz * dz).sqrt();
            let mag = dt / (distance * distance * distance);
            let b_mass_mag = b.mass * mag;
            let b2_mass_mag = b2.mass * mag;

            b.vx -= dx * b2_mass_mag;
            b.vy -= dy * b2_mass_mag;
            b.vz -= dz * b2_mass_mag;
            b2.vx += dx * b_mass_mag;
            b2.vy += dy * b_mass_mag;
            b2.vz += dz * b_mass_mag;
        }
        b.x += dt * b.vx;
        b.y += dt * b.vy;
        b.z += dt * b.vz;
    }
}

pub struct Nbody {
    bodies: [Planet; 5],
    initial_energy: f64,
}

impl Default for Nbody {
    fn default() -> Self {
        Self::new()
    }
}

impl Nbody {
    pub fn new() -> Self {
        Self {
            bodies: create_bodies(),
            initial_energy: 0.0,
        }
    }

    pub fn energy(&self) -> f64 {
        energy(&self.bodies)
    }
}

impl Workload for Nbody {
    fn name(&self) -> String {
        "CLBG::Nbody".to_string()
    }

    fn prepare(&mut self, _rng: &mut Prng) {
        offset_momentum(&mut self.bodies);
        self.initial_energy = energy(&self.bodies);
    }

    fn run(&mut self, _rng: &mut Prng, _iteration: u64) {
        for _ in 0..STEPS_PER_RUN {
            advance(&mut self.bodies, DT);
        }
    }

    fn checksum(&self) -> u32 {
        (checksum_f64(self.initial_energy) << 5) & checksum_f64(self.energy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workloads::test_support::{drive, entry};

    #[test]
    fn test_initial_energy() {
        let mut w = Nbody::new();
        w.prepare(&mut Prng::new());
        assert_eq!(format!("{:.9}", w.energy()), "-0.169075164");
    }

    #[test]
    fn test_energy_after_1000_steps() {
        let mut w = Nbody::new();
        let mut rng = Prng::new();
        w.prepare(&mut rng);
        w.run(&mut rng, 0);
        assert_eq!(format!("{:.9}", w.energy()), "-0.169087605");
    }

    #[test]
    fn test_smoke_checksum() {
        let e = entry("CLBG::Nbody", r#"{"checksum": 338796608, "iterations": 2}"#);
        let mut w = Nbody::new();
        assert_eq!(drive(&mut w, &e), 338796608);
    }
}
