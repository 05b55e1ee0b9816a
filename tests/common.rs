// Copyright 2019 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

// Permission is hereby granted, free of charge, to any person obtaining a copy of this
// software and associated documentation files (the "Software"), to deal in the Software
// without restriction, including without limitation the rights to use, copy, modify,
// merge, publish, distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED,
// INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT
// HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE
// SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
#![allow(dead_code)]

use frame_converter::ConversionFlag;
use rand::Rng;

/// Row length in bytes of a plane holding `elements` bytes per row plus `padding`
pub const fn stride(elements: usize, padding: usize) -> usize {
    elements + padding
}

/// A plane of random bytes, padding included
pub fn random_plane(elements: usize, height: usize, padding: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..stride(elements, padding) * height)
        .map(|_| rng.gen::<u8>())
        .collect()
}

/// Copies the visible part of a plane, dropping the padding at the end of its rows
pub fn strip_padding(plane: &[u8], elements: usize, height: usize, padding: usize) -> Vec<u8> {
    plane
        .chunks(stride(elements, padding))
        .take(height)
        .flat_map(|row| row[..elements].iter().copied())
        .collect()
}

/// Appends `padding` random bytes to each of the `height` rows of a plane
pub fn add_padding(plane: &[u8], elements: usize, height: usize, padding: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut padded = Vec::with_capacity(stride(elements, padding) * height);
    for row in plane.chunks(elements).take(height) {
        padded.extend_from_slice(row);
        padded.extend((0..padding).map(|_| rng.gen::<u8>()));
    }

    padded
}

/// Reorders the pixels of a packed plane the way a conversion flag does
pub fn orient(
    plane: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    flag: ConversionFlag,
) -> Vec<u8> {
    let mut oriented = vec![0_u8; width * height * channels];
    for y in 0..height {
        let source_y = if flag.is_flipped() { height - 1 - y } else { y };
        for x in 0..width {
            let source_x = if flag.is_mirrored() { width - 1 - x } else { x };
            let from = (source_y * width + source_x) * channels;
            let to = (y * width + x) * channels;
            oriented[to..to + channels].copy_from_slice(&plane[from..from + channels]);
        }
    }

    oriented
}

/// Largest absolute difference between two planes of the same size
pub fn max_difference(a: &[u8], b: &[u8]) -> u8 {
    assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}
