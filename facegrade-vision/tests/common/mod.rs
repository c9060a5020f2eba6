#![allow(dead_code)]

use facegrade_vision::{FaceBox, LandmarkSet};
use image::{DynamicImage, Rgb, RgbImage};

/// Shape of a synthetic face, in pixels.
#[derive(Debug, Clone, Copy)]
pub struct FaceShape {
    /// x of the vertical midline.
    pub cx: f64,
    pub face_width: f64,
    pub face_height: f64,
    /// Distance between eye centers.
    pub interocular: f64,
    pub eye_width: f64,
    pub eye_height: f64,
    pub nose_width: f64,
    pub mouth_width: f64,
}

impl FaceShape {
    /// Every ratio exactly on its target.
    pub fn ideal(cx: f64) -> Self {
        Self {
            cx,
            face_width: 100.0,
            face_height: 100.0,
            interocular: 46.0,
            eye_width: 20.0,
            eye_height: 6.0,
            nose_width: 22.0,
            mouth_width: 34.0,
        }
    }
}

/// Partner of each landmark under a left/right mirror (self for midline points).
pub fn mirror_index(i: usize) -> usize {
    match i {
        0..=16 => 16 - i,
        17..=26 => 43 - i,
        27..=30 | 33 | 51 | 57 | 62 | 66 => i,
        31 | 32 => 66 - i,
        34 | 35 => 66 - i,
        36..=39 => 81 - i,
        40 | 41 => 87 - i,
        42..=45 => 81 - i,
        46 | 47 => 87 - i,
        48..=50 | 52..=54 => 102 - i,
        55 | 56 | 58 | 59 => 114 - i,
        60 | 61 | 63 | 64 => 124 - i,
        65 | 67 => 132 - i,
        _ => unreachable!("landmark index {} out of range", i),
    }
}

/// 68 points for `shape`, mirror-symmetric about `x = shape.cx`.
pub fn face_points(shape: &FaceShape) -> Vec<(f64, f64)> {
    let FaceShape {
        cx,
        face_width: fw,
        face_height: fh,
        interocular: io,
        eye_width: ew,
        eye_height: eh,
        nose_width: nw,
        mouth_width: mw,
    } = *shape;
    // Bridge at y = 30, eye line at y = 40.
    let top = 30.0;
    let eye_y = 40.0;

    // Offsets from the midline for the left half (negative x side).
    let mut left: Vec<(usize, f64, f64)> = Vec::new();
    for i in 0..=8 {
        let t = i as f64 / 8.0;
        left.push((i, -(fw / 2.0) * (1.0 - t), eye_y + (top + fh - eye_y) * t));
    }
    for k in 0..5 {
        left.push((17 + k, -(fw / 2.0) + 8.0 + 8.0 * k as f64, 25.0));
    }
    for (i, y) in [(27, top), (28, 45.0), (29, 55.0), (30, 65.0)] {
        left.push((i, 0.0, y));
    }
    left.push((31, -nw / 2.0, 70.0));
    left.push((32, -nw / 4.0, 72.0));
    left.push((33, 0.0, 73.0));

    let ex = -io / 2.0;
    left.push((36, ex - ew / 2.0, eye_y));
    left.push((37, ex - ew / 6.0, eye_y - eh / 2.0));
    left.push((38, ex + ew / 6.0, eye_y - eh / 2.0));
    left.push((39, ex + ew / 2.0, eye_y));
    left.push((40, ex + ew / 6.0, eye_y + eh / 2.0));
    left.push((41, ex - ew / 6.0, eye_y + eh / 2.0));

    left.push((48, -mw / 2.0, 95.0));
    left.push((49, -mw / 3.0, 92.0));
    left.push((50, -mw / 6.0, 91.0));
    left.push((51, 0.0, 92.0));
    left.push((57, 0.0, 99.0));
    left.push((58, -mw / 6.0, 99.0));
    left.push((59, -mw / 3.0, 98.0));
    left.push((60, -mw / 3.0, 95.0));
    left.push((61, -mw / 6.0, 94.0));
    left.push((62, 0.0, 94.0));
    left.push((66, 0.0, 96.0));
    left.push((67, -mw / 6.0, 96.0));

    let mut offsets = vec![None; 68];
    for (i, dx, y) in left {
        offsets[i] = Some((dx, y));
        offsets[mirror_index(i)] = Some((-dx, y));
    }
    offsets
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            let (dx, y) = p.unwrap_or_else(|| panic!("landmark {} not placed", i));
            (cx + dx, y)
        })
        .collect()
}

pub fn face_landmarks(shape: &FaceShape) -> LandmarkSet {
    LandmarkSet::from_xy(&face_points(shape)).unwrap()
}

/// Box around the synthetic face.
pub fn face_box(shape: &FaceShape) -> FaceBox {
    FaceBox::new(
        shape.cx - shape.face_width / 2.0,
        20.0,
        shape.face_width,
        shape.face_height + 20.0,
    )
    .unwrap()
}

pub fn flat_image(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
}

/// Alternating black and white columns: maximal luminance variance.
pub fn striped_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, _| {
        if x % 2 == 0 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    }))
}
