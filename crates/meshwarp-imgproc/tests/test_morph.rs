use meshwarp_image::{DynamicImage, Image, ImageSize};
use meshwarp_imgproc::{
    dynamic::morph_dynamic,
    morph::morph,
    warp::{warp_image, warp_mesh},
    AntialiasKernel, WarpError,
};
use meshwarp_mesh::{interpolate_meshes, ImagePoint, MeshGrid, Point};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn disc(size: ImageSize, cx: f64, cy: f64, r: f64) -> Image<u8, 4> {
    Image::from_fn(size, |x, y| {
        let d = ((x as f64 - cx).powi(2) + (y as f64 - cy).powi(2)).sqrt();
        if d > r {
            [0, 0, 0, 255]
        } else {
            [(255.0 * d / r) as u8, 255, 0, 255]
        }
    })
}

fn block(size: ImageSize, x0: usize, y0: usize, e: usize) -> Image<u8, 4> {
    Image::from_fn(size, |x, y| {
        if (x0..x0 + e).contains(&x) && (y0..y0 + e).contains(&y) {
            [255, 255, 0, 255]
        } else {
            [0, 0, 0, 255]
        }
    })
}

fn grid_mesh(xs: [i32; 5], ys: [i32; 5]) -> MeshGrid {
    let rows: Vec<Vec<ImagePoint>> = ys
        .iter()
        .map(|&y| xs.iter().map(|&x| ImagePoint::new(x, y)).collect())
        .collect();
    MeshGrid::from_image_points(&rows)
}

fn random_functional_mesh(rng: &mut StdRng, size: ImageSize) -> MeshGrid {
    let mut mesh = MeshGrid::new_regular(7, 6, size.width, size.height);
    for y in 1..mesh.ny() - 1 {
        for x in 1..mesh.nx() - 1 {
            let d = Point::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0));
            mesh.set(x, y, mesh.get(x, y) + d);
        }
    }
    mesh.functionalize(size.width, size.height);
    mesh
}

#[test]
fn circle_to_square() -> Result<(), WarpError> {
    let _ = env_logger::builder().is_test(true).try_init();

    let size = ImageSize::from([64, 64]);
    let circle = disc(size, 24.0, 24.0, 16.0);
    let square = block(size, 24, 24, 32);

    let mut circle_mesh = grid_mesh([0, 13, 24, 35, 63], [0, 13, 24, 35, 63]);
    circle_mesh.set_image_point(2, 1, ImagePoint::new(24, 8));
    circle_mesh.set_image_point(1, 2, ImagePoint::new(8, 24));
    circle_mesh.set_image_point(3, 2, ImagePoint::new(40, 24));
    circle_mesh.set_image_point(2, 3, ImagePoint::new(24, 40));
    let square_mesh = grid_mesh([0, 24, 40, 55, 63], [0, 24, 40, 55, 63]);

    for kernel in AntialiasKernel::ALL {
        let start = morph(&circle, &square, &circle_mesh, &square_mesh, 0.0, kernel)?;
        assert_eq!(start, circle);

        let end = morph(&circle, &square, &circle_mesh, &square_mesh, 1.0, kernel)?;
        assert_eq!(end, square);

        let mid = morph(&circle, &square, &circle_mesh, &square_mesh, 0.5, kernel)?;
        assert_eq!(mid.size(), size);
        assert_ne!(mid, circle);
        assert_ne!(mid, square);
        // the shape sits between both centres, so the point halfway is lit
        let px = mid.pixel(32, 32).unwrap_or_default();
        assert!(px[1] > 100, "{kernel}: {px:?}");
        // far corners stay black
        assert_eq!(mid.pixel(1, 62), Some([0, 0, 0, 255]));
    }

    Ok(())
}

#[test]
fn warp_to_itself_is_identity() -> Result<(), WarpError> {
    let size = ImageSize::from([50, 40]);
    let img = disc(size, 20.0, 18.0, 15.0);
    let mut rng = StdRng::seed_from_u64(77);

    for _ in 0..5 {
        let mesh = random_functional_mesh(&mut rng, size);
        for kernel in AntialiasKernel::ALL {
            let t = rng.random_range(0.0..=1.0);
            assert_eq!(warp_image(&img, &mesh, &mesh, t, kernel)?, img);
        }
    }
    Ok(())
}

#[test]
fn warp_fraction_matches_interpolated_target() -> Result<(), WarpError> {
    let size = ImageSize::from([48, 48]);
    let img = disc(size, 24.0, 24.0, 20.0).map(|v| v as f32);
    let mut rng = StdRng::seed_from_u64(5);
    let src = random_functional_mesh(&mut rng, size);
    let dst = random_functional_mesh(&mut rng, size);

    let target = interpolate_meshes(&src, &dst, 0.35)?;

    let mut via_fraction = Image::<f32, 4>::from_size_val(size, 0.0)?;
    warp_mesh(&img, &mut via_fraction, &src, &dst, 0.35, AntialiasKernel::Bilinear)?;

    let mut via_target = Image::<f32, 4>::from_size_val(size, 0.0)?;
    warp_mesh(&img, &mut via_target, &src, &target, 1.0, AntialiasKernel::Bilinear)?;

    assert_eq!(via_fraction, via_target);
    Ok(())
}

#[test]
fn morph_dynamic_matches_typed_morph() -> Result<(), WarpError> {
    let size = ImageSize::from([32, 32]);
    let a = disc(size, 12.0, 12.0, 10.0);
    let b = block(size, 12, 12, 16);
    let m1 = MeshGrid::new_regular(5, 5, 32, 32);
    let mut m2 = m1.clone();
    m2.set(2, 2, Point::new(18.0, 17.0));

    let typed = morph(&a, &b, &m1, &m2, 0.6, AntialiasKernel::Lanczos4)?;
    let dynamic = morph_dynamic(
        &DynamicImage::Rgba8(a),
        &DynamicImage::Rgba8(b),
        &m1,
        &m2,
        0.6,
        AntialiasKernel::Lanczos4,
    )?;
    assert_eq!(dynamic, DynamicImage::Rgba8(typed));
    Ok(())
}
