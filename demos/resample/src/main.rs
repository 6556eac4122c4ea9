use argh::FromArgs;
use std::path::PathBuf;

use planar::image::Region;
use planar::imgproc::{crop, pyramid, resize, subsample};
use planar::io::{functional as F, xml, Detection};

#[derive(FromArgs)]
/// Subsample, resize, reduce and crop an image, writing every result to disk
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// directory to write the results to
    #[argh(option, short = 'o', default = "PathBuf::from(\"resample-out\")")]
    output_dir: PathBuf,

    /// scale factor of the area subsample, in (0, 1]
    #[argh(option, default = "0.5")]
    subsample_scale: f64,

    /// scale factor of the linear resize
    #[argh(option, default = "1.5")]
    resize_scale: f64,

    /// number of pyramid levels to build
    #[argh(option, default = "4")]
    pyramid_levels: usize,

    /// crop region as x1,y1,x2,y2; defaults to the central half of the image
    #[argh(option)]
    crop: Option<String>,
}

fn parse_region(text: &str) -> Result<Region, Box<dyn std::error::Error>> {
    let values = text
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()?;
    match values.as_slice() {
        [x1, y1, x2, y2] => Ok(Region::new(*x1, *y1, *x2, *y2)),
        _ => Err(format!("expected x1,y1,x2,y2, got {text:?}").into()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // read the image
    let image = F::read_image_rgb(&args.image_path)?;
    log::info!("loaded {} from {:?}", image.size(), args.image_path);

    std::fs::create_dir_all(&args.output_dir)?;
    let out = |name: &str| args.output_dir.join(name);

    // area subsample
    let small = subsample::subsample(&image, args.subsample_scale)?;
    F::write_image_rgb(out("subsample.png"), &small)?;

    // linear resize
    let resized = resize::resize(&image, args.resize_scale)?;
    F::write_image_rgb(out("resize.png"), &resized)?;

    // gaussian pyramid
    let levels = pyramid::build_pyramid(&image, args.pyramid_levels)?;
    for (i, level) in levels.iter().enumerate() {
        F::write_image_rgb(out(&format!("pyramid_{i}.png")), level)?;
    }

    // crop, both owned and shared
    let region = match &args.crop {
        Some(text) => parse_region(text)?,
        None => Region::new(
            image.width() as f64 * 0.25,
            image.height() as f64 * 0.25,
            image.width() as f64 * 0.75,
            image.height() as f64 * 0.75,
        ),
    };
    let (owned, offset) = crop::crop(&image, region)?;
    F::write_image_rgb(out("crop.png"), &owned)?;
    {
        let (shared, _) = crop::crop_shared(&image, region)?;
        F::write_image_rgb(out("crop_shared.png"), &shared)?;
    }
    log::info!(
        "cropped {} at row {} column {}",
        owned.size(),
        offset.y,
        offset.x
    );

    // report the crop as a detection
    let detections = [Detection {
        boxes: vec![region],
        score: 1.0,
        component: 0,
    }];
    F::write_detection_image(out("detections.png"), &image, &detections)?;
    xml::write_detections_xml(out("detections.xml"), &detections)?;

    log::info!("results written to {:?}", args.output_dir);

    Ok(())
}
