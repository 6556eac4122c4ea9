use std::{io::Write, path::Path};

use quick_xml::{
    events::{BytesEnd, BytesStart, Event},
    Writer,
};

use crate::{draw::Detection, error::IoError};

type Attributes = Vec<(&'static str, String)>;

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), IoError> {
    writer
        .write_event(event)
        .map_err(|e| IoError::XmlEncodingError(e.to_string()))
}

fn start<'a>(name: &'a str, attributes: &'a Attributes) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    for (key, value) in attributes {
        element.push_attribute((*key, value.as_str()));
    }
    element
}

fn part_attributes(id: usize, part: &planar_image::Region) -> Attributes {
    vec![
        ("id", id.to_string()),
        ("x1", format!("{:.6}", part.x1)),
        ("x2", format!("{:.6}", part.x2)),
        ("y1", format!("{:.6}", part.y1)),
        ("y2", format!("{:.6}", part.y2)),
    ]
}

/// Write the detection report to `inner`.
///
/// The root `detected_faces` element counts the detections. Every detection becomes a
/// `face` with a 1-based `id`, its `score` and its `view`, holding a `landmarks`
/// element that lists its part boxes as `part` elements. Floating point values are
/// written with six decimals and nesting is indented with tabs.
pub fn write_detections<W: Write>(inner: W, detections: &[Detection]) -> Result<W, IoError> {
    let mut writer = Writer::new_with_indent(inner, b'\t', 1);

    let root: Attributes = vec![("total", detections.len().to_string())];
    if detections.is_empty() {
        emit(&mut writer, Event::Empty(start("detected_faces", &root)))?;
    } else {
        emit(&mut writer, Event::Start(start("detected_faces", &root)))?;
    }

    for (i, detection) in detections.iter().enumerate() {
        let face: Attributes = vec![
            ("id", (i + 1).to_string()),
            ("score", format!("{:.6}", detection.score)),
            ("view", detection.view().to_string()),
        ];
        emit(&mut writer, Event::Start(start("face", &face)))?;

        let landmarks: Attributes = vec![("total", detection.boxes.len().to_string())];
        if detection.boxes.is_empty() {
            emit(&mut writer, Event::Empty(start("landmarks", &landmarks)))?;
        } else {
            emit(&mut writer, Event::Start(start("landmarks", &landmarks)))?;
            for (j, part) in detection.boxes.iter().enumerate() {
                let attributes = part_attributes(j + 1, part);
                emit(&mut writer, Event::Empty(start("part", &attributes)))?;
            }
            emit(&mut writer, Event::End(BytesEnd::new("landmarks")))?;
        }

        emit(&mut writer, Event::End(BytesEnd::new("face")))?;
    }

    if !detections.is_empty() {
        emit(&mut writer, Event::End(BytesEnd::new("detected_faces")))?;
    }

    let mut inner = writer.into_inner();
    inner.write_all(b"\n")?;
    Ok(inner)
}

/// Render the detection report as a string.
///
/// See [`write_detections`] for the layout of the document.
pub fn detections_to_xml(detections: &[Detection]) -> Result<String, IoError> {
    let bytes = write_detections(Vec::new(), detections)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes the detection report to the given file path.
///
/// # Arguments
///
/// * `file_path` - The path to the XML file.
/// * `detections` - The detections to report.
pub fn write_detections_xml(
    file_path: impl AsRef<Path>,
    detections: &[Detection],
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let file = std::io::BufWriter::new(std::fs::File::create(file_path)?);
    let mut file = write_detections(file, detections)?;
    file.flush()?;

    log::debug!(
        "wrote {} detections to {}",
        detections.len(),
        file_path.display()
    );
    Ok(())
}
