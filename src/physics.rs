/// Rapier velocity handoff helpers
///
/// The motion core never holds a physics body. These helpers let the
/// driver react to the two moments the core defines: zeroing a body's
/// velocity when a motion completes naturally, and seeding it with the
/// velocity estimate returned by `remove`.

use glam::DVec3;
use rapier3d::prelude::*;

use crate::motion::TickReport;

/// Zero the body's linear velocity if this tick completed the motion.
pub fn settle_on_completion(report: &TickReport, body: &mut RigidBody) {
    if report.completed {
        zero_body_velocity(body);
    }
}

pub fn zero_body_velocity(body: &mut RigidBody) {
    body.set_linvel(Vector::zeros(), true);
}

/// Seed the body with a velocity handed off by the motion core, e.g. the
/// return value of `MotionManager::remove`.
pub fn seed_body_velocity(body: &mut RigidBody, velocity: DVec3) {
    body.set_linvel(dvec3_to_vector(velocity), true);
}

pub fn body_velocity(body: &RigidBody) -> DVec3 {
    vector_to_dvec3(*body.linvel())
}

/// Convert DVec3 to Rapier Vector
fn dvec3_to_vector(v: DVec3) -> Vector<Real> {
    Vector::new(v.x as f32, v.y as f32, v.z as f32)
}

/// Convert Rapier Vector to DVec3
fn vector_to_dvec3(v: Vector<Real>) -> DVec3 {
    DVec3::new(v.x as f64, v.y as f64, v.z as f64)
}
