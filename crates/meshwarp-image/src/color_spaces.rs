use crate::image::{Image, ImageSize};

/// Macro to define the closed set of pixel layouts together with the image variant holding them.
macro_rules! define_pixel_formats {
    ($(($name:ident, $type:ty, $channels:expr, $doc:expr)),+ $(,)?) => {
        /// The pixel layout of a [`DynamicImage`].
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum PixelFormat {
            $(
                #[doc = $doc]
                $name,
            )+
        }

        impl PixelFormat {
            /// Number of interleaved channels per pixel.
            pub fn num_channels(&self) -> usize {
                match self {
                    $(PixelFormat::$name => $channels,)+
                }
            }

            /// Number of bytes used by a single channel sample.
            pub fn bytes_per_channel(&self) -> usize {
                match self {
                    $(PixelFormat::$name => std::mem::size_of::<$type>(),)+
                }
            }
        }

        /// An image whose pixel layout is only known at runtime.
        ///
        /// Each variant wraps a typed [`Image`] whose channel count and sample type match
        /// the layout named by the variant.
        #[derive(Clone, Debug, PartialEq)]
        pub enum DynamicImage {
            $(
                #[doc = $doc]
                $name(Image<$type, $channels>),
            )+
        }

        impl DynamicImage {
            /// The pixel layout of the image.
            pub fn format(&self) -> PixelFormat {
                match self {
                    $(DynamicImage::$name(_) => PixelFormat::$name,)+
                }
            }

            /// The size of the image in pixels.
            pub fn size(&self) -> ImageSize {
                match self {
                    $(DynamicImage::$name(img) => img.size(),)+
                }
            }
        }
    };
}

define_pixel_formats!(
    (Gray8, u8, 1, "Grayscale with 8-bit unsigned integer channels"),
    (Gray16, u16, 1, "Grayscale with 16-bit unsigned integer channels"),
    (Alpha8, u8, 1, "Alpha-only coverage mask with 8-bit channels"),
    (Rgba8, u8, 4, "RGBA with straight alpha and 8-bit channels"),
    (
        PremultipliedRgba8,
        u8,
        4,
        "RGBA with premultiplied alpha and 8-bit channels"
    ),
    (Rgba16, u16, 4, "RGBA with straight alpha and 16-bit channels"),
    (Cmyk8, u8, 4, "CMYK with 8-bit unsigned integer channels"),
    (Rgb8, u8, 3, "RGB with 8-bit unsigned integer channels"),
    (GrayAlpha8, u8, 2, "Grayscale plus straight alpha with 8-bit channels"),
);

impl PixelFormat {
    /// Whether the warp engine resamples this layout without a conversion.
    ///
    /// Only one and four channel layouts are native; everything else goes through
    /// the canonical [`PixelFormat::Rgba8`] representation.
    pub fn is_native(&self) -> bool {
        matches!(self.num_channels(), 1 | 4)
    }

    /// Whether the layout carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(
            self,
            PixelFormat::Alpha8
                | PixelFormat::Rgba8
                | PixelFormat::PremultipliedRgba8
                | PixelFormat::Rgba16
                | PixelFormat::GrayAlpha8
        )
    }

    /// Whether the color channels are premultiplied by alpha.
    pub fn is_premultiplied(&self) -> bool {
        matches!(self, PixelFormat::PremultipliedRgba8)
    }
}

fn narrow_u16(v: u16) -> u8 {
    ((v as u32 + 128) / 257) as u8
}

fn unpremultiply(c: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8
}

fn cmyk_to_rgb(c: u8, k: u8) -> u8 {
    (((255 - c) as u32 * (255 - k) as u32 + 127) / 255) as u8
}

impl DynamicImage {
    /// Convert the image to the canonical 8-bit straight-alpha RGBA representation.
    ///
    /// 16-bit samples are narrowed with rounding, premultiplied colors are divided by
    /// their alpha, CMYK is converted to RGB with an opaque alpha, and alpha-only masks
    /// become white with the mask as alpha.
    ///
    /// # Examples
    ///
    /// ```
    /// use meshwarp_image::{DynamicImage, Image};
    ///
    /// let gray = DynamicImage::Gray8(Image::new([1, 1].into(), vec![7u8]).unwrap());
    /// assert_eq!(gray.to_rgba8().as_slice(), &[7, 7, 7, 255]);
    /// ```
    pub fn to_rgba8(&self) -> Image<u8, 4> {
        match self {
            DynamicImage::Rgba8(img) => img.clone(),
            DynamicImage::Gray8(img) => expand(img, |[g]| [g, g, g, 255]),
            DynamicImage::Gray16(img) => expand(img, |[g]| {
                let g = narrow_u16(g);
                [g, g, g, 255]
            }),
            DynamicImage::Alpha8(img) => expand(img, |[a]| {
                if a == 0 {
                    [0, 0, 0, 0]
                } else {
                    [255, 255, 255, a]
                }
            }),
            DynamicImage::PremultipliedRgba8(img) => expand(img, |[r, g, b, a]| {
                [
                    unpremultiply(r, a),
                    unpremultiply(g, a),
                    unpremultiply(b, a),
                    a,
                ]
            }),
            DynamicImage::Rgba16(img) => expand(img, |px| px.map(narrow_u16)),
            DynamicImage::Cmyk8(img) => expand(img, |[c, m, y, k]| {
                [cmyk_to_rgb(c, k), cmyk_to_rgb(m, k), cmyk_to_rgb(y, k), 255]
            }),
            DynamicImage::Rgb8(img) => expand(img, |[r, g, b]| [r, g, b, 255]),
            DynamicImage::GrayAlpha8(img) => expand(img, |[g, a]| [g, g, g, a]),
        }
    }
}

fn expand<T: Copy + Default, const C: usize>(
    img: &Image<T, C>,
    f: impl Fn([T; C]) -> [u8; 4],
) -> Image<u8, 4> {
    let src = img.as_slice();
    let cols = img.cols();
    Image::from_fn(img.size(), |x, y| {
        let base = (y * cols + x) * C;
        let mut px = [T::default(); C];
        px.copy_from_slice(&src[base..base + C]);
        f(px)
    })
}
