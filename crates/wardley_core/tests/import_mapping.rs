use wardley_core::import::{
    ComponentDetector, Detection, ImageFormat, ImageInfo, ImportError, ImportPhase, ImportSession,
    OrientationHandle, OrientationPoints, PlaceholderDetector,
};
use wardley_core::{CanvasGeometry, Component, ComponentId, MapModel, Point};

struct NothingFound;

impl ComponentDetector for NothingFound {
    fn detect(&self, _image: &ImageInfo) -> Detection {
        Detection::default()
    }
}

fn detected_session(width: f64, height: f64) -> ImportSession {
    let mut session = ImportSession::new();
    session.load_image(ImageInfo::new(width, height, ImageFormat::Png).unwrap());
    session.begin_detection().unwrap();
    session.complete_detection(&PlaceholderDetector).unwrap();
    session
}

#[test]
fn midpoint_of_frame_lands_on_plot_midpoint() {
    let frame = OrientationPoints {
        bottom_left: Point::new(0.0, 100.0),
        top_left: Point::new(0.0, 0.0),
        bottom_right: Point::new(100.0, 100.0),
    };
    let relative = frame.project(Point::new(50.0, 50.0)).unwrap();
    assert_eq!((relative.rel_x, relative.rel_y), (0.5, 0.5));
    assert_eq!(
        relative.to_canvas(&CanvasGeometry::default()),
        Point::new(400.0, 300.0)
    );
}

#[test]
fn oblique_frame_uses_scalar_projection() {
    let frame = OrientationPoints {
        bottom_left: Point::new(0.0, 100.0),
        top_left: Point::new(20.0, 0.0),
        bottom_right: Point::new(100.0, 100.0),
    };
    let relative = frame.project(frame.top_left).unwrap();
    assert!((relative.rel_y - 1.0).abs() < 1e-12);
    assert!((relative.rel_x - 0.2).abs() < 1e-12);
}

#[test]
fn session_walks_through_phases() {
    let mut session = ImportSession::new();
    assert_eq!(session.phase(), ImportPhase::NoImage);
    assert_eq!(session.begin_detection(), Err(ImportError::NoImage));

    session.load_image(ImageInfo::new(1000.0, 800.0, ImageFormat::Jpeg).unwrap());
    assert_eq!(session.phase(), ImportPhase::ImageLoaded);
    assert!(!session.can_commit());
    assert_eq!(
        session.complete_detection(&PlaceholderDetector),
        Err(ImportError::NotDetecting)
    );

    session.begin_detection().unwrap();
    assert_eq!(session.phase(), ImportPhase::Detecting);
    assert_eq!(session.complete_detection(&PlaceholderDetector), Ok(10));
    assert_eq!(session.phase(), ImportPhase::Detected);
    assert!(session.can_commit());
}

#[test]
fn loading_an_image_resets_orientation_defaults() {
    let mut session = ImportSession::new();
    session.load_image(ImageInfo::new(200.0, 100.0, ImageFormat::Png).unwrap());
    assert!(session.drag_orientation_point(OrientationHandle::TopLeft, 5.0, -2.0));
    assert_eq!(
        session.orientation().unwrap().top_left,
        Point::new(15.0, 3.0)
    );

    session.load_image(ImageInfo::new(200.0, 100.0, ImageFormat::Png).unwrap());
    assert_eq!(
        session.orientation().unwrap(),
        &OrientationPoints::defaults_for(200.0, 100.0)
    );
}

#[test]
fn commit_maps_candidates_and_closes_session() {
    let mut session = detected_session(1000.0, 1000.0);
    let mut model = MapModel::new(CanvasGeometry::default());

    let outcome = session.commit(&mut model).unwrap();

    assert_eq!(outcome.added_components.len(), 10);
    assert_eq!(outcome.added_relationships, 13);
    assert_eq!(model.components().len(), 10);
    assert_eq!(model.live_relationships().len(), 13);
    assert_eq!(session.phase(), ImportPhase::NoImage);

    // Customer sits at (196, 110) with the default frame (50..950).
    let customer = model.component(&ComponentId::from("c1")).unwrap();
    let rel_x = (196.0 - 50.0) / 900.0;
    let rel_y = (950.0 - 110.0) / 900.0;
    assert!((customer.x - (40.0 + rel_x * 720.0)).abs() < 1e-9);
    assert!((customer.y - (560.0 - rel_y * 520.0)).abs() < 1e-9);
}

#[test]
fn candidate_drag_is_delta_based() {
    let mut session = detected_session(1000.0, 1000.0);
    let c2 = ComponentId::from("c2");
    let before = session.candidates()[1].position;

    assert!(session.drag_candidate(&c2, 10.0, -5.0));
    assert!(!session.drag_candidate(&ComponentId::from("zz"), 1.0, 1.0));
    assert_eq!(
        session.candidates()[1].position,
        Point::new(before.x + 10.0, before.y - 5.0)
    );
}

#[test]
fn empty_detection_disables_commit() {
    let mut session = ImportSession::new();
    session.load_image(ImageInfo::new(640.0, 480.0, ImageFormat::Gif).unwrap());
    session.begin_detection().unwrap();
    assert_eq!(session.complete_detection(&NothingFound), Ok(0));

    assert!(!session.can_commit());
    let mut model = MapModel::default();
    assert_eq!(
        session.commit(&mut model),
        Err(ImportError::NothingToImport)
    );
    assert!(model.is_empty());
}

#[test]
fn degenerate_frame_leaves_model_untouched() {
    let mut session = detected_session(1000.0, 1000.0);
    // Collapse bottom-right onto bottom-left.
    session.drag_orientation_point(OrientationHandle::BottomRight, -900.0, 0.0);
    let mut model = MapModel::default();

    assert_eq!(
        session.commit(&mut model),
        Err(ImportError::DegenerateOrientation)
    );
    assert!(model.is_empty());
    assert!(session.can_commit());
}

#[test]
fn colliding_ids_are_skipped_with_their_relationships() {
    let mut session = detected_session(1000.0, 1000.0);
    let mut model = MapModel::default();
    model.insert_component(Component::new("c5", "Existing", 400.0, 300.0));

    let outcome = session.commit(&mut model).unwrap();

    assert_eq!(outcome.skipped_components, 1);
    assert_eq!(outcome.added_components.len(), 9);
    // c1->c5, c3->c5, c4->c5, c5->c6, c5->c7
    assert_eq!(outcome.skipped_relationships, 5);
    assert_eq!(outcome.added_relationships, 8);
    assert_eq!(
        model.component(&ComponentId::from("c5")).unwrap().name,
        "Existing"
    );
}

#[test]
fn image_format_comes_from_extension() {
    assert_eq!(ImageFormat::from_extension("JPG"), Some(ImageFormat::Jpeg));
    assert_eq!(
        ImageFormat::from_path(std::path::Path::new("/tmp/map.svg")),
        Some(ImageFormat::Svg)
    );
    assert_eq!(ImageFormat::from_extension("bmp"), None);
    assert!(matches!(
        ImageInfo::new(0.0, 10.0, ImageFormat::Png),
        Err(ImportError::InvalidImage(_))
    ));
}
