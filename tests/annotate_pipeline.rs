use linshot::annotate::{EditorSession, FixedMetrics, PressOutcome, ToolKind};
use linshot::capture::{ChannelOrder, PixelSurface, Rgba8};
use linshot::compose::{add_border, export_to_file, flatten, to_rgba_bytes};

fn base_image() -> PixelSurface {
    let mut surface = PixelSurface::new(100, 80, ChannelOrder::Bgra);
    surface.fill(Rgba8::rgba(40, 60, 80, 255));
    surface
}

#[test]
fn drag_annotate_flatten_and_export() {
    let mut session = EditorSession::new();
    session.set_image(base_image());
    session.settings_mut().fill = true;
    session.select_tool(Some(ToolKind::Rectangle));

    assert_eq!(session.pointer_down(10.0, 10.0), PressOutcome::BeganAnnotation);
    session.pointer_move(50.0, 40.0);
    session.pointer_up(50.0, 40.0);
    assert_eq!(session.annotations().len(), 1);

    let base = session.image().expect("image set").clone();
    let mut annotations: Vec<_> = session.annotations().to_vec();
    let flattened = flatten(&base, &mut annotations, None, &FixedMetrics::default());

    // Default stroke is red and fill was enabled.
    assert_eq!(flattened.pixel(30, 25), Rgba8::rgba(255, 0, 0, 255));
    assert_eq!(flattened.pixel(80, 70), Rgba8::rgba(40, 60, 80, 255));

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("LinShot_0001.png");
    export_to_file(&flattened, &path).expect("export png");
    assert!(path.exists());
}

#[test]
fn border_then_clipboard_bytes_keep_channel_order() {
    let mut surface = PixelSurface::new(2, 1, ChannelOrder::Bgra);
    surface.put_pixel(0, 0, Rgba8::rgba(10, 20, 30, 200));
    surface.put_pixel(1, 0, Rgba8::rgba(40, 50, 60, 255));

    let framed = add_border(&surface, 1, Rgba8::BLACK);
    assert_eq!((framed.width(), framed.height()), (4, 3));
    assert_eq!(framed.pixel(1, 1), Rgba8::rgba(10, 20, 30, 200));

    let bytes = to_rgba_bytes(&framed);
    assert_eq!(bytes.len(), 4 * 3 * 4);
    // Pixel (1,1) sits at row 1, column 1 of the tightly packed buffer.
    let idx = (1 * 4 + 1) * 4;
    assert_eq!(&bytes[idx..idx + 4], &[10, 20, 30, 200]);
}

#[test]
fn undo_after_flatten_removes_the_annotation_from_the_next_flatten() {
    let mut session = EditorSession::new();
    session.set_image(base_image());
    session.settings_mut().fill = true;
    session.select_tool(Some(ToolKind::Ellipse));
    session.pointer_down(20.0, 20.0);
    session.pointer_up(60.0, 50.0);

    session.undo();
    let base = session.image().expect("image set").clone();
    let mut annotations: Vec<_> = session.annotations().to_vec();
    let flattened = flatten(&base, &mut annotations, None, &FixedMetrics::default());
    assert_eq!(flattened.pixel(40, 35), Rgba8::rgba(40, 60, 80, 255));
}
