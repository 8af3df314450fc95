// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use app_config::{AppConfig, EditorSettings, WindowSettings};
use bevy::{
    app::AppExit,
    prelude::*,
    window::{PrimaryWindow, WindowCloseRequested, WindowMoved, WindowResized},
    winit::WinitWindows,
};
use std::io::Cursor;
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    window::{Fullscreen, Icon},
};

/// Restores the primary window's placement from the last session.
pub fn apply_initial_window_settings(
    windows: NonSend<WinitWindows>,
    primary_window: Query<Entity, With<PrimaryWindow>>,
    window_settings: Res<WindowSettings>,
) {
    debug!("Initial {:?}", *window_settings);

    let Ok(primary_entity) = primary_window.get_single() else {
        return;
    };
    let Some(primary) = windows.get_window(primary_entity) else {
        return;
    };

    primary.set_min_inner_size(Some(LogicalSize::new(
        WindowSettings::MIN_WIDTH as f64,
        WindowSettings::MIN_HEIGHT as f64,
    )));
    primary.set_outer_position(PhysicalPosition::new(
        window_settings.position.x,
        window_settings.position.y,
    ));

    if window_settings.maximized {
        primary.set_maximized(true);
    } else if let Some(resolution) = window_settings.known_resolution() {
        let _ = primary.request_inner_size(LogicalSize::new(
            resolution.x as f64,
            resolution.y as f64,
        ));
    }

    if window_settings.fullscreen {
        primary.set_fullscreen(Some(Fullscreen::Borderless(None)));
    }
}

/// Sets the icon on Windows and X11.  The icon on macOS comes from the
/// application bundle instead.
pub fn set_window_icon(
    windows: NonSend<WinitWindows>,
    primary_window: Query<Entity, With<PrimaryWindow>>,
) {
    let Ok(primary_entity) = primary_window.get_single() else {
        return;
    };
    let Some(primary) = windows.get_window(primary_entity) else {
        return;
    };
    let icon_buf = Cursor::new(include_bytes!("../assets/images/icon.png"));
    match image::load(icon_buf, image::ImageFormat::Png) {
        Ok(image) => {
            let image = image.into_rgba8();
            let (width, height) = image.dimensions();
            match Icon::from_rgba(image.into_raw(), width, height) {
                Ok(icon) => primary.set_window_icon(Some(icon)),
                Err(err) => warn!("Invalid window icon: {}", err),
            }
        }
        Err(err) => warn!("Failed to decode window icon: {}", err),
    }
}

/// Tracks the primary window's size, position and state as the user changes
/// them.
pub fn update_window_settings(
    mut resize_events: EventReader<WindowResized>,
    mut move_events: EventReader<WindowMoved>,
    mut window_settings: ResMut<WindowSettings>,
    windows: NonSend<WinitWindows>,
    primary_window: Query<Entity, With<PrimaryWindow>>,
) {
    if resize_events.is_empty() && move_events.is_empty() {
        return;
    }
    let resized = !resize_events.is_empty();
    let moved = !move_events.is_empty();
    resize_events.clear();
    move_events.clear();
    let Ok(primary_entity) = primary_window.get_single() else {
        return;
    };
    let Some(primary) = windows.get_window(primary_entity) else {
        return;
    };

    if resized {
        let is_maximized = primary.is_maximized();
        let is_fullscreen = primary.fullscreen().is_some();
        // Remember the restored size, not the maximized one.
        if !is_maximized && !is_fullscreen {
            let scale_factor = primary.scale_factor() as f32;
            let size = primary.inner_size();
            window_settings.resolution = Vec2::new(
                size.width as f32 / scale_factor,
                size.height as f32 / scale_factor,
            );
        }
        window_settings.maximized = is_maximized;
        window_settings.fullscreen = is_fullscreen;
    }

    if moved {
        if let Ok(position) = primary.outer_position() {
            window_settings.position = IVec2::new(position.x, position.y);
        }
    }

    debug!("Updated {:?}", *window_settings);
}

pub fn save_settings_on_exit(
    app_config: Res<AppConfig>,
    mut app_exit_events: EventReader<AppExit>,
    mut close_events: EventReader<WindowCloseRequested>,
    window_settings: Res<WindowSettings>,
    editor_settings: Res<EditorSettings>,
) {
    if app_exit_events.is_empty() && close_events.is_empty() {
        return;
    }
    app_exit_events.clear();
    close_events.clear();
    if app_config.db_path.is_none() {
        return;
    }

    debug!("Saving settings before exit...");
    if let Err(err) = window_settings.save(&app_config) {
        error!("Failed to save window settings: {}", err);
    }
    if let Err(err) = editor_settings.save(&app_config) {
        error!("Failed to save editor settings: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_saves_settings_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_db_path(dir.path().join("settings.sqlite3"));

        let mut app = App::new();
        app.add_event::<WindowCloseRequested>()
            .insert_resource(config.clone())
            .init_resource::<WindowSettings>()
            .init_resource::<EditorSettings>()
            .add_systems(Update, save_settings_on_exit);

        app.world.send_event(AppExit);
        app.update();
        assert_eq!(EditorSettings::load(&config).fps_cap, 100.0);

        // The same exit event must not save again on the next frame.
        app.world.resource_mut::<EditorSettings>().fps_cap = 30.0;
        app.update();
        assert_eq!(EditorSettings::load(&config).fps_cap, 100.0);
    }
}

// End of File
