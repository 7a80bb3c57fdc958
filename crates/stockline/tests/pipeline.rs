//! End-to-end loading of stocklines from configuration.

use glam::{Vec3, Vec4};
use stockline::{Error, FileSource, MemorySource, MeshError, Yard, YardConfig, load_stockline};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn encode(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// A small pile: a ramp along `x`, repeated on every row.
fn pile(width: u32, depth: u32) -> Vec<f32> {
    (0..depth)
        .flat_map(|_| (0..width).map(|x| f32::from(u16::try_from(x).unwrap()) * 0.5))
        .collect()
}

#[tokio::test]
async fn test_yard_from_json() {
    init_tracing();

    let config = YardConfig::from_json(
        r#"{
            "stocklines": [
                { "name": "A", "source": "a.bin", "width": 8, "depth": 5 },
                { "name": "B", "source": "b.bin", "width": 6, "depth": 4,
                  "triangulator": "bowyer-watson", "interval": 0.5 },
                { "name": "C", "source": "c.bin", "width": 4, "depth": 4,
                  "strict_dimensions": true }
            ]
        }"#,
    )
    .unwrap();

    let source = MemorySource::new();
    source.insert("a.bin", encode(&pile(8, 5)));
    source.insert("b.bin", encode(&pile(6, 4)));
    // One sample short of a 4x4 lattice.
    source.insert("c.bin", encode(&pile(5, 3)));

    let yard = Yard::from_config(config).unwrap();
    let results = yard.load(&source).await;
    assert_eq!(results.len(), 3);

    let (name, a) = &results[0];
    assert_eq!(name, "A");
    let a = a.as_ref().unwrap();
    assert_eq!(a.mesh.vertex_count(), 40);
    assert_eq!(a.mesh.triangle_count(), 2 * 7 * 4);

    let (name, b) = &results[1];
    assert_eq!(name, "B");
    let b = b.as_ref().unwrap();
    assert_eq!(b.mesh.triangle_count(), 2 * 5 * 3);
    // Ramp tops out at 2.5 world units, the top of the High band
    // (2.0, 2.5] at interval 0.5.
    let top = b.bounds().max.y;
    assert!((top - 2.5).abs() < 1e-6);
    let orange = Vec4::new(1.0, 0.58, 0.0, 1.0);
    assert!((b.color_at(top) - orange).abs().max_element() < 1e-5);

    let (name, c) = &results[2];
    assert_eq!(name, "C");
    assert!(matches!(
        c,
        Err(Error::Mesh(MeshError::DimensionMismatch {
            expected: 16,
            actual: 15
        }))
    ));
}

#[tokio::test]
async fn test_surface_faces_up() {
    init_tracing();

    let source = MemorySource::new();
    source.insert("flat", encode(&[3.0; 12]));
    let config = YardConfig::from_json(
        r#"{ "stocklines": [ { "name": "flat", "source": "flat", "width": 4, "depth": 3 } ] }"#,
    )
    .unwrap();
    let pipeline = config.stocklines[0].pipeline().unwrap();

    let surface = load_stockline(pipeline, "flat", &source).await.unwrap();
    for normal in surface.mesh.normals() {
        assert!((*normal - Vec3::Y).length() < 1e-5);
    }
    for color in surface.vertex_colors() {
        // Height 3.0 with interval 1 is the top of the Mid band.
        assert_eq!(color, Vec4::new(1.0, 1.0, 0.0, 1.0));
    }
}

#[tokio::test]
async fn test_file_source_round_trip() {
    init_tracing();

    let root = std::env::temp_dir().join(format!("stockline-it-{}", std::process::id()));
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("1_GridContent.txt"), encode(&pile(5, 5))).unwrap();

    let config = YardConfig::from_json(r#"{ "stocklines": [ { "width": 5, "depth": 5 } ] }"#)
        .unwrap();
    let yard = Yard::from_config(config).unwrap();
    let results = yard.load(&FileSource::new(&root)).await;
    std::fs::remove_dir_all(&root).unwrap();

    let (name, surface) = &results[0];
    assert_eq!(name, "stockline");
    let surface = surface.as_ref().unwrap();
    assert_eq!(surface.mesh.triangle_count(), 32);
    let bounds = surface.bounds();
    assert!((bounds.max - Vec3::new(0.4, 2.0, 0.4)).length() < 1e-6);
}

#[tokio::test]
async fn test_missing_stream_is_malformed() {
    init_tracing();

    let pipeline = YardConfig::from_json(r#"{ "stocklines": [ {} ] }"#).unwrap().stocklines[0]
        .pipeline()
        .unwrap();
    let err = load_stockline(pipeline, "nope", &MemorySource::new())
        .await
        .unwrap_err();
    assert!(err.is_malformed_stream());
}
