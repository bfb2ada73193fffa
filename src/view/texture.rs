use image::{Rgba, RgbaImage};

use crate::model::TextureKey;

pub const TEXTURE_SIZE: u32 = 64;

/// Generate the pixels for one procedural texture.
pub fn generate(key: TextureKey) -> RgbaImage {
    let s = TEXTURE_SIZE;
    match key {
        TextureKey::White | TextureKey::SpecularFull => solid([255, 255, 255]),
        TextureKey::Black => solid([0, 0, 0]),
        TextureKey::SpecularSoft => solid([96, 96, 96]),
        TextureKey::Yellow => solid([250, 210, 60]),
        TextureKey::Pink => solid([240, 120, 180]),
        TextureKey::Red => solid([220, 40, 50]),
        TextureKey::Grass => checker([70, 150, 60], [60, 135, 52], 8),
        TextureKey::Sand => RgbaImage::from_fn(s, s, |x, y| {
            let grain = (hash(x, y) % 24) as u8;
            Rgba([210 - grain, 185 - grain, 130 - grain, 255])
        }),
        TextureKey::Wood => RgbaImage::from_fn(s, s, |x, y| {
            let ring = ((x as f32 * 0.35 + (y as f32 * 0.15).sin() * 2.0).sin() * 0.5 + 0.5) * 30.0;
            Rgba([150 - ring as u8, 100 - ring as u8, 55, 255])
        }),
        TextureKey::Metal => RgbaImage::from_fn(s, s, |x, y| {
            let shade = 150 + ((x + y) * 60 / (2 * s)) as u8;
            Rgba([shade, shade, shade + 10, 255])
        }),
        TextureKey::Water => RgbaImage::from_fn(s, s, |x, y| {
            let wave = ((x as f32 * 0.4).sin() + (y as f32 * 0.3).cos()) * 12.0;
            Rgba([40, (140.0 + wave) as u8, (220.0 + wave * 0.5) as u8, 255])
        }),
        TextureKey::Brick => RgbaImage::from_fn(s, s, |x, y| {
            let row = y / 16;
            let shift = if row % 2 == 0 { 0 } else { 16 };
            let mortar = y % 16 < 2 || (x + shift) % 32 < 2;
            if mortar {
                Rgba([200, 195, 185, 255])
            } else {
                Rgba([170, 60, 45, 255])
            }
        }),
        TextureKey::TitleCard => title_card(),
        TextureKey::InstructionsCard => instructions_card(),
        TextureKey::PauseCard => pause_card(),
    }
}

fn solid(rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(TEXTURE_SIZE, TEXTURE_SIZE, Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

fn checker(a: [u8; 3], b: [u8; 3], cell: u32) -> RgbaImage {
    RgbaImage::from_fn(TEXTURE_SIZE, TEXTURE_SIZE, |x, y| {
        let c = if (x / cell + y / cell) % 2 == 0 { a } else { b };
        Rgba([c[0], c[1], c[2], 255])
    })
}

fn hash(x: u32, y: u32) -> u32 {
    let mut h = x.wrapping_mul(374_761_393) ^ y.wrapping_mul(668_265_263);
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^ (h >> 16)
}

/// Party banner: pastel stripes with confetti dots.
fn title_card() -> RgbaImage {
    const STRIPES: [[u8; 3]; 4] = [[250, 210, 60], [240, 120, 180], [90, 180, 240], [120, 210, 120]];
    RgbaImage::from_fn(TEXTURE_SIZE, TEXTURE_SIZE, |x, y| {
        if hash(x, y) % 29 == 0 {
            return Rgba([255, 255, 255, 255]);
        }
        let c = STRIPES[((x + y) / 8 % 4) as usize];
        Rgba([c[0], c[1], c[2], 255])
    })
}

/// Light panel with ruled lines standing in for the controls list.
fn instructions_card() -> RgbaImage {
    RgbaImage::from_fn(TEXTURE_SIZE, TEXTURE_SIZE, |x, y| {
        let border = x < 3 || y < 3 || x >= TEXTURE_SIZE - 3 || y >= TEXTURE_SIZE - 3;
        let line = y % 8 == 6 && x > 8 && x < TEXTURE_SIZE - 8 - (y / 8 % 3) * 6;
        if border {
            Rgba([90, 180, 240, 255])
        } else if line {
            Rgba([60, 60, 80, 255])
        } else {
            Rgba([245, 240, 225, 255])
        }
    })
}

/// Two light bars on a dark background.
fn pause_card() -> RgbaImage {
    RgbaImage::from_fn(TEXTURE_SIZE, TEXTURE_SIZE, |x, y| {
        let in_rows = (20..44).contains(&y);
        let bar = (22..28).contains(&x) || (36..42).contains(&x);
        if in_rows && bar {
            Rgba([240, 240, 240, 255])
        } else {
            Rgba([30, 40, 70, 255])
        }
    })
}

/// Upload an image as an sRGB texture and return its view.
pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: &RgbaImage, label: &str) -> wgpu::TextureView {
    let (width, height) = image.dimensions();
    let extent = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        image,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        extent,
    );

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_texture_is_square_and_opaque() {
        for key in TextureKey::ALL {
            let img = generate(key);
            assert_eq!(img.dimensions(), (TEXTURE_SIZE, TEXTURE_SIZE), "{:?}", key);
            assert!(img.pixels().all(|p| p.0[3] == 255), "{:?} has transparent pixels", key);
        }
    }

    #[test]
    fn test_cards_are_distinct() {
        let title = generate(TextureKey::TitleCard);
        let help = generate(TextureKey::InstructionsCard);
        let pause = generate(TextureKey::PauseCard);
        assert_ne!(title, help);
        assert_ne!(help, pause);
        assert_eq!(pause.get_pixel(24, 30).0, [240, 240, 240, 255]);
        assert_eq!(pause.get_pixel(2, 2).0, [30, 40, 70, 255]);
    }
}
