use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Viewport size reported by the host page, in CSS (logical) pixels.
///
/// The canvas element's CSS size is controlled by the host; the viewer
/// only resizes its drawing buffer to match and never writes styles back.
#[derive(Event, Debug, Clone, Copy)]
pub struct ViewportResizeEvent {
    pub width: f32,
    pub height: f32,
}

/// Apply host resize requests: update the logical window resolution and
/// recompute the camera aspect ratio so the next presented frame is never
/// stretched. Device-pixel scaling stays with the windowing layer.
///
/// Safe at any point in the lifecycle, including before any asset has
/// loaded.
pub fn apply_viewport_resize(
    mut resize_events: EventReader<ViewportResizeEvent>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut projections: Query<&mut Projection, With<Camera3d>>,
) {
    for event in resize_events.read() {
        if event.width <= 0.0 || event.height <= 0.0 {
            warn!(
                "Ignoring viewport resize to {}x{}",
                event.width, event.height
            );
            continue;
        }

        if let Ok(mut window) = windows.single_mut() {
            window.resolution.set(event.width, event.height);
        }

        for mut projection in &mut projections {
            if let Projection::Perspective(perspective) = projection.as_mut() {
                perspective.aspect_ratio = event.width / event.height;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resize_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_event::<ViewportResizeEvent>();
        app.add_systems(Update, apply_viewport_resize);
        app
    }

    fn spawn_camera(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((
                Camera3d::default(),
                Projection::Perspective(PerspectiveProjection::default()),
            ))
            .id()
    }

    fn aspect_of(app: &App, camera: Entity) -> f32 {
        match app.world().get::<Projection>(camera).unwrap() {
            Projection::Perspective(perspective) => perspective.aspect_ratio,
            _ => panic!("expected a perspective projection"),
        }
    }

    #[test]
    fn resize_recomputes_aspect_ratio_for_any_positive_size() {
        let mut app = resize_app();
        let camera = spawn_camera(&mut app);
        app.world_mut().spawn((Window::default(), PrimaryWindow));

        for (width, height) in [(1280.0, 720.0), (333.0, 777.0), (1.0, 1.0), (2560.0, 1080.0)] {
            app.world_mut()
                .send_event(ViewportResizeEvent { width, height });
            app.update();
            assert!((aspect_of(&app, camera) - width / height).abs() < 1e-6);
        }

        let mut window_query = app
            .world_mut()
            .query_filtered::<&Window, With<PrimaryWindow>>();
        let window = window_query.single(app.world()).unwrap();
        assert_eq!(window.resolution.width(), 2560.0);
        assert_eq!(window.resolution.height(), 1080.0);
    }

    #[test]
    fn resize_before_any_asset_load_is_safe() {
        // No asset machinery at all in this app; the resize path must not
        // depend on it.
        let mut app = resize_app();
        let camera = spawn_camera(&mut app);
        app.world_mut()
            .send_event(ViewportResizeEvent {
                width: 640.0,
                height: 480.0,
            });
        app.update();
        assert!((aspect_of(&app, camera) - 640.0 / 480.0).abs() < 1e-6);
    }

    #[test]
    fn non_positive_sizes_are_ignored() {
        let mut app = resize_app();
        let camera = spawn_camera(&mut app);
        app.world_mut()
            .send_event(ViewportResizeEvent {
                width: 800.0,
                height: 600.0,
            });
        app.update();
        app.world_mut()
            .send_event(ViewportResizeEvent {
                width: 0.0,
                height: 600.0,
            });
        app.update();
        assert!((aspect_of(&app, camera) - 800.0 / 600.0).abs() < 1e-6);
    }
}
