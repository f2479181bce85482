use std::path::Path;

use northarrow::{AcquisitionError, Document, Error, NoNetwork, Options, Rotation, Size, Url};

const PNG_2X3: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, // signature
    0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52, // IHDR
    0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x03, // 2x3
    0x08, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

fn options(resources_dir: &Path) -> Options {
    Options {
        resources_dir: Some(resources_dir.to_path_buf()),
        ..Options::default()
    }
}

fn files_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

fn size() -> Size {
    Size::new(300, 300).unwrap()
}

fn rotation(degrees: f64) -> Rotation {
    Rotation::from_degrees(degrees).unwrap()
}

#[test]
fn local_svg() {
    let out = tempfile::tempdir().unwrap();
    let path = northarrow::create(
        size(),
        "north-arrow.svg",
        rotation(90.0),
        out.path(),
        &options(Path::new("tests/files")),
        &NoNetwork,
    )
    .unwrap();

    assert_eq!(path.parent().unwrap(), out.path());
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("north-arrow-"));
    assert!(name.ends_with(".svg"));

    let output_svg = std::fs::read_to_string(&path).unwrap();
    let expected_svg = std::fs::read_to_string("tests/files/north-arrow-expected.svg").unwrap();
    assert!(output_svg.trim_end() == expected_svg.trim_end());
}

#[test]
fn every_call_creates_a_new_file() {
    let out = tempfile::tempdir().unwrap();
    let opt = options(Path::new("tests/files"));

    let path1 =
        northarrow::create(size(), "north-arrow.svg", rotation(0.0), out.path(), &opt, &NoNetwork)
            .unwrap();
    let path2 =
        northarrow::create(size(), "north-arrow.svg", rotation(0.0), out.path(), &opt, &NoNetwork)
            .unwrap();

    assert_ne!(path1, path2);
    assert_eq!(files_count(out.path()), 2);
}

#[test]
fn local_png() {
    let resources = tempfile::tempdir().unwrap();
    std::fs::write(resources.path().join("arrow.png"), PNG_2X3).unwrap();

    let out = tempfile::tempdir().unwrap();
    let path = northarrow::create(
        Size::new(64, 32).unwrap(),
        "arrow.png",
        rotation(45.0),
        out.path(),
        &options(resources.path()),
        &NoNetwork,
    )
    .unwrap();

    let doc = Document::from_data(&std::fs::read(&path).unwrap()).unwrap();
    let root = doc.root_element();
    assert_eq!(root.attribute("width"), Some("64"));
    assert_eq!(root.attribute("height"), Some("32"));

    let g = root.child_elements().next().unwrap();
    assert_eq!(g.attribute("transform"), Some("rotate(45.0 32 16)"));

    let image = g.child_elements().next().unwrap();
    assert_eq!(image.name().local, "image");
    assert_eq!(image.attribute("width"), Some("64"));
    assert_eq!(image.attribute("height"), Some("32"));
    assert!(image
        .attribute("xlink:href")
        .unwrap()
        .starts_with("data:image/png;base64,"));
}

#[test]
fn remote_svg() {
    let data = std::fs::read("tests/files/north-arrow-viewbox.svg").unwrap();
    let client = move |url: &Url| -> Result<Vec<u8>, AcquisitionError> {
        match url.as_str() {
            "https://example.com/arrows/north.svg" => Ok(data.clone()),
            _ => Err(AcquisitionError::HttpStatus(404)),
        }
    };

    let out = tempfile::tempdir().unwrap();
    let path = northarrow::create(
        size(),
        " https://example.com/arrows/north.svg ",
        rotation(-90.0),
        out.path(),
        &Options::default(),
        &client,
    )
    .unwrap();

    let doc = Document::from_data(&std::fs::read(&path).unwrap()).unwrap();
    let g = doc.root_element().child_elements().next().unwrap();
    assert_eq!(g.attribute("transform"), Some("rotate(-90.0 150 150)"));

    let source = g.child_elements().next().unwrap();
    assert_eq!(source.attribute("viewBox"), Some("0 0 61.06 91.83"));
}

#[test]
fn remote_error() {
    let client = |_: &Url| -> Result<Vec<u8>, AcquisitionError> {
        Err(AcquisitionError::HttpStatus(404))
    };

    let out = tempfile::tempdir().unwrap();
    let res = northarrow::create(
        size(),
        "https://example.com/missing.svg",
        rotation(0.0),
        out.path(),
        &Options::default(),
        &client,
    );

    assert!(matches!(
        res,
        Err(Error::AcquisitionFailed(AcquisitionError::HttpStatus(404)))
    ));
    assert_eq!(files_count(out.path()), 0);
}

#[test]
fn unreachable_reference() {
    let out = tempfile::tempdir().unwrap();
    let res = northarrow::create(
        size(),
        "missing.svg",
        rotation(0.0),
        out.path(),
        &options(Path::new("tests/files")),
        &NoNetwork,
    );

    assert!(matches!(res, Err(Error::AcquisitionFailed(_))));
    assert_eq!(files_count(out.path()), 0);
}

#[test]
fn malformed_svg() {
    let resources = tempfile::tempdir().unwrap();
    std::fs::write(
        resources.path().join("broken.svg"),
        "<svg xmlns='http://www.w3.org/2000/svg'><g></svg>",
    )
    .unwrap();

    let out = tempfile::tempdir().unwrap();
    let res = northarrow::create(
        size(),
        "broken.svg",
        rotation(0.0),
        out.path(),
        &options(resources.path()),
        &NoNetwork,
    );

    assert!(matches!(res, Err(Error::ParsingFailed(_))));
    assert_eq!(files_count(out.path()), 0);
}

#[test]
fn not_an_image() {
    let resources = tempfile::tempdir().unwrap();
    std::fs::write(resources.path().join("arrow.txt"), "north").unwrap();

    let out = tempfile::tempdir().unwrap();
    let res = northarrow::create(
        size(),
        "arrow.txt",
        rotation(0.0),
        out.path(),
        &options(resources.path()),
        &NoNetwork,
    );

    assert!(matches!(res, Err(Error::UnsupportedImage)));
    assert_eq!(files_count(out.path()), 0);
}

#[test]
fn missing_working_dir() {
    let out = tempfile::tempdir().unwrap();
    let res = northarrow::create(
        size(),
        "north-arrow.svg",
        rotation(0.0),
        &out.path().join("missing"),
        &options(Path::new("tests/files")),
        &NoNetwork,
    );

    assert!(matches!(res, Err(Error::WritingFailed(_))));
}
