use argh::FromArgs;
use meshwarp_image::{Image, ImageSize};
use meshwarp_imgproc::{morph::morph, AntialiasKernel};
use meshwarp_mesh::{interpolate_meshes, io::write_mesh_file, ImagePoint, MeshGrid};

/// Morphs a green circle into a yellow square and reports every frame
#[derive(Debug, FromArgs)]
struct Args {
    /// width and height of the square frames
    #[argh(option, short = 's', default = "256")]
    size: usize,

    /// number of frames to generate
    #[argh(option, short = 'n', default = "29")]
    frames: usize,

    /// antialias kernel: nearest, bilinear, lanczos or lanczos4
    #[argh(option, short = 'k', default = "AntialiasKernel::default()")]
    kernel: AntialiasKernel,

    /// optional path to write the halfway mesh to
    #[argh(option, short = 'm')]
    mesh_out: Option<String>,
}

fn draw_circle(size: ImageSize, cx: i64, cy: i64, r: i64) -> Image<u8, 4> {
    Image::from_fn(size, |x, y| {
        let (dx, dy) = (x as i64 - cx, y as i64 - cy);
        let dist = dx * dx + dy * dy;
        if dist > r * r {
            [0, 0, 0, 255]
        } else {
            let rb = (255 - 255 * dist / (r * r)) as u8;
            [rb, 255, rb, 255]
        }
    })
}

fn draw_square(size: ImageSize, cx: i64, cy: i64, e: i64) -> Image<u8, 4> {
    let e2 = e / 2;
    Image::from_fn(size, |x, y| {
        let (x, y) = (x as i64, y as i64);
        if (cx - e2..cx + e2).contains(&x) && (cy - e2..cy + e2).contains(&y) {
            let dist = (cx - x).abs() + (cy - y).abs();
            [255, 255, (255 - 255 * dist / e).clamp(0, 255) as u8, 255]
        } else {
            [0, 0, 0, 255]
        }
    })
}

fn square_mesh(size: ImageSize, cx: i32, cy: i32, e: i32) -> MeshGrid {
    let e2 = e / 2;
    let xs = [0, cx - e2, cx, cx + e2 - 1, size.width as i32 - 1];
    let ys = [0, cy - e2, cy, cy + e2 - 1, size.height as i32 - 1];
    let rows: Vec<Vec<ImagePoint>> = ys
        .iter()
        .map(|&y| xs.iter().map(|&x| ImagePoint::new(x, y)).collect())
        .collect();
    MeshGrid::from_image_points(&rows)
}

fn circle_mesh(size: ImageSize, cx: i32, cy: i32, r: i32) -> MeshGrid {
    // inscribed square with the compass points pushed out onto the circle
    let e = (r as f64 / std::f64::consts::SQRT_2) as i32;
    let mut mesh = square_mesh(size, cx, cy, 2 * e);
    mesh.set_image_point(2, 1, ImagePoint::new(cx, cy - r));
    mesh.set_image_point(2, 3, ImagePoint::new(cx, cy + r));
    mesh.set_image_point(3, 2, ImagePoint::new(cx + r, cy));
    mesh.set_image_point(1, 2, ImagePoint::new(cx - r, cy));
    mesh
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let size = ImageSize {
        width: args.size,
        height: args.size,
    };
    let s = args.size as i32;
    let (circle_c, circle_r) = (s * 3 / 8, s / 4);
    let (square_c, square_e) = (s * 5 / 8, s / 2);

    let circle = draw_circle(size, circle_c as i64, circle_c as i64, circle_r as i64);
    let square = draw_square(size, square_c as i64, square_c as i64, square_e as i64);

    let mut circle_mesh = circle_mesh(size, circle_c, circle_c, circle_r);
    let mut square_mesh = square_mesh(size, square_c, square_c, square_e);
    let moved = circle_mesh.functionalize(size.width, size.height)
        + square_mesh.functionalize(size.width, size.height);
    log::info!("functionalized meshes, {} points moved", moved);

    if let Some(path) = &args.mesh_out {
        let halfway = interpolate_meshes(&circle_mesh, &square_mesh, 0.5)?;
        write_mesh_file(&halfway, path)?;
        log::info!("wrote the halfway mesh to {}", path);
    }

    let last = args.frames.saturating_sub(1).max(1) as f64;
    for i in 0..args.frames {
        let t = i as f64 / last;
        let start = std::time::Instant::now();
        let frame = morph(&circle, &square, &circle_mesh, &square_mesh, t, args.kernel)?;

        let lit = frame
            .as_slice()
            .chunks_exact(4)
            .filter(|px| px[1] > 0)
            .count();
        log::info!(
            "frame {:>3} t = {:.3}: {} lit pixels in {:?}",
            i,
            t,
            lit,
            start.elapsed()
        );
    }

    Ok(())
}
