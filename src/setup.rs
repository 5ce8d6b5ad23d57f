// ./src/setup.rs
use crate::math::algorithms::marching_cubes::{Lattice, SurfaceMesh};
use crate::physics::sim::resources::SurfaceMeshHandle;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    lattice: Res<Lattice>,
    surface: Res<SurfaceMesh>,
) {
    let bounds = lattice.bounds();
    let center = bounds.center();
    let extent = bounds.size().max_element();

    // Isofläche; das Mesh wird jeden Frame ersetzt
    let handle = meshes.add(surface.to_bevy_mesh());
    commands.spawn(PbrBundle {
        mesh: handle.clone(),
        material: materials.add(StandardMaterial {
            base_color: Color::rgb(0.8, 0.35, 0.3),
            metallic: 0.1,
            perceptual_roughness: 0.5,
            // Das Netz ist nicht geschlossen, Rückseiten sollen sichtbar bleiben
            double_sided: true,
            cull_mode: None,
            ..default()
        }),
        ..default()
    });
    commands.insert_resource(SurfaceMeshHandle(handle));

    // Licht
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            shadows_enabled: true,
            intensity: 10_000_000.,
            range: extent * 10.0,
            ..default()
        },
        transform: Transform::from_translation(center + Vec3::new(1.0, 2.0, 1.0) * extent),
        ..default()
    });
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 200.0,
    });

    // Kamera
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(center + Vec3::new(-0.8, 1.0, 2.0) * extent)
                .looking_at(center, Vec3::Y),
            ..default()
        },
        PanOrbitCamera {
            focus: center,
            button_orbit: MouseButton::Right,
            button_pan: MouseButton::Middle,
            radius: Some(extent * 2.0),
            ..default()
        },
    ));
    info!(
        "Scene ready, camera focused on lattice center {:?} (extent {:.2}).",
        center, extent
    );
}
