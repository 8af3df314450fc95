// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use app_config::EditorSettings;
use bevy::{prelude::*, utils::Instant};
use std::time::Duration;

pub struct FrameLimiterPlugin;

const MIN_FPS_CAP: f32 = 1.0;
const MAX_FPS_CAP: f32 = 1000.0;

impl Plugin for FrameLimiterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameLimiter>()
            .add_systems(Last, limit_frame_rate);
    }
}

/// Caps the frame rate by sleeping away whatever is left of each frame's
/// time budget.
#[derive(Resource, Debug)]
pub struct FrameLimiter {
    frame_start: Instant,
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self {
            frame_start: Instant::now(),
        }
    }
}

impl FrameLimiter {
    /// Time still to wait this frame, given how long the frame has taken so
    /// far.
    pub fn remaining(elapsed: Duration, fps_cap: f32) -> Duration {
        if !(fps_cap.is_finite() && fps_cap > 0.0) {
            return Duration::ZERO;
        }
        let fps_cap = fps_cap.clamp(MIN_FPS_CAP, MAX_FPS_CAP);
        Duration::from_secs_f64(1.0 / fps_cap as f64).saturating_sub(elapsed)
    }
}

fn limit_frame_rate(mut limiter: ResMut<FrameLimiter>, settings: Res<EditorSettings>) {
    let remaining = FrameLimiter::remaining(limiter.frame_start.elapsed(), settings.fps_cap);
    if !remaining.is_zero() {
        std::thread::sleep(remaining);
    }
    limiter.frame_start = Instant::now();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_at_one_hundred_fps() {
        assert_eq!(
            FrameLimiter::remaining(Duration::from_millis(4), 100.0),
            Duration::from_millis(6)
        );
        assert_eq!(
            FrameLimiter::remaining(Duration::from_millis(15), 100.0),
            Duration::ZERO
        );
    }

    #[test]
    fn out_of_range_caps_are_clamped() {
        assert_eq!(
            FrameLimiter::remaining(Duration::ZERO, 1e-30),
            Duration::from_secs(1)
        );
        assert_eq!(
            FrameLimiter::remaining(Duration::ZERO, 1e9),
            Duration::from_millis(1)
        );
    }

    #[test]
    fn no_cap_never_waits() {
        assert_eq!(FrameLimiter::remaining(Duration::ZERO, 0.0), Duration::ZERO);
        assert_eq!(FrameLimiter::remaining(Duration::ZERO, f32::INFINITY), Duration::ZERO);
    }
}

// End of File
