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
use crate::convert_image::common::*;
use crate::options::ConversionOptions;

/// Weighted sum of the first three channels of a pixel, using one row of a
/// column major 3x3 matrix
#[inline(always)]
fn weighted_sum(factors: &[i32; 9], row: usize, pixel: &[u8]) -> i32 {
    factors[row] * i32::from(pixel[0])
        + factors[row + 3] * i32::from(pixel[1])
        + factors[row + 6] * i32::from(pixel[2])
}

/// Stores a pixel computed with 6 bit precision, sources already debiased
#[inline(always)]
fn store_precision_6bit<const TGT: usize>(
    target: &mut [u8],
    x: usize,
    channels: [i32; 3],
    options: &ConversionOptions,
) {
    let factors = &options.factors;
    let pixel = &mut target[x * TGT..(x + 1) * TGT];
    for (row, value) in pixel.iter_mut().enumerate().take(3) {
        *value = fix6_to_u8(
            factors[row] * channels[0] + factors[row + 3] * channels[1] + factors[row + 6] * channels[2],
        );
    }

    if TGT == 4 {
        pixel[3] = options.channel_value;
    }
}

/// Stores a pixel computed with 10 bit precision
#[inline(always)]
fn store_precision_10bit<const TGT: usize>(
    target: &mut [u8],
    x: usize,
    channels: [i32; 3],
    options: &ConversionOptions,
) {
    let factors = &options.factors;
    let pixel = &mut target[x * TGT..(x + 1) * TGT];
    for (row, value) in pixel.iter_mut().enumerate().take(3) {
        *value = fix10_to_u8(
            factors[row] * channels[0] + factors[row + 3] * channels[1] + factors[row + 6] * channels[2],
            options.biases[row],
        );
    }

    if TGT == 4 {
        pixel[3] = options.channel_value;
    }
}

/// Chroma pair of a 2x2 block, from one interleaved plane or from two planes
#[inline(always)]
fn load_chroma_pair<const CHROMA_PLANES: usize>(chroma: &[&[u8]], block: usize) -> (u8, u8) {
    if CHROMA_PLANES == 1 {
        (chroma[0][2 * block], chroma[0][2 * block + 1])
    } else {
        (chroma[0][block], chroma[1][block])
    }
}

#[inline(always)]
fn store_chroma_pair<const CHROMA_PLANES: usize>(
    chroma: &mut [&mut [u8]],
    block: usize,
    first: u8,
    second: u8,
) {
    if CHROMA_PLANES == 1 {
        chroma[0][2 * block] = first;
        chroma[0][2 * block + 1] = second;
    } else {
        chroma[0][block] = first;
        chroma[1][block] = second;
    }
}

fn copy_row(source: &[u8], target: &mut [u8], width: usize, mirror: bool) {
    if mirror {
        for (value, source) in target[..width].iter_mut().zip(source[..width].iter().rev()) {
            *value = *source;
        }
    } else {
        target[..width].copy_from_slice(&source[..width]);
    }
}

const fn identity_pattern(channels: usize) -> u32 {
    let mut pattern = 0;
    let mut channel = 0;
    while channel < channels {
        pattern |= (channel as u32) << (4 * channel);
        channel += 1;
    }

    pattern
}

/// Converts pixels with 7 bit precision, e.g. RGB to YUV or to Y.
///
/// Target channel c is `(sum_k f[c][k] * s[k] + 128 * b[c] + 64) >> 7`, clamped to
/// [0, 255]. Only the first three source channels are read.
pub fn convert_row_precision_7bit<const SRC: usize, const TGT: usize>(
    source: &[u8],
    target: &mut [u8],
    pixels: usize,
    options: &ConversionOptions,
) {
    debug_assert!(SRC >= 3 && TGT <= 3);
    let factors = &options.factors;
    let biases = &options.biases;

    for (pixel, value) in source
        .chunks_exact(SRC)
        .zip(target.chunks_exact_mut(TGT))
        .take(pixels)
    {
        for (row, channel) in value.iter_mut().enumerate() {
            *channel = fix7_to_u8(weighted_sum(factors, row, pixel), biases[row]);
        }
    }
}

/// Converts pixels with 6 bit precision, e.g. YUV to RGB.
///
/// Biases are subtracted from the source channels:
/// target channel c is `sum_k f[c][k] * (s[k] - b[k]) / 64`, truncated, clamped to
/// [0, 255]. A fourth target channel receives the channel value.
pub fn convert_row_precision_6bit<const SRC: usize, const TGT: usize>(
    source: &[u8],
    target: &mut [u8],
    pixels: usize,
    options: &ConversionOptions,
) {
    debug_assert!(SRC >= 3 && (TGT == 3 || TGT == 4));
    let biases = &options.biases;

    for (x, pixel) in source.chunks_exact(SRC).take(pixels).enumerate() {
        let channels = [
            i32::from(pixel[0]) - biases[0],
            i32::from(pixel[1]) - biases[1],
            i32::from(pixel[2]) - biases[2],
        ];

        store_precision_6bit::<TGT>(target, x, channels, options);
    }
}

/// Converts pixels with 10 bit precision, e.g. YUV to RGB.
///
/// Target channel c is `sum_k f[c][k] * s[k] / 1024 + b[c]`, the division truncated,
/// clamped to [0, 255]. A fourth target channel receives the channel value.
pub fn convert_row_precision_10bit<const SRC: usize, const TGT: usize>(
    source: &[u8],
    target: &mut [u8],
    pixels: usize,
    options: &ConversionOptions,
) {
    debug_assert!(SRC >= 3 && (TGT == 3 || TGT == 4));

    for (x, pixel) in source.chunks_exact(SRC).take(pixels).enumerate() {
        let channels = [
            i32::from(pixel[0]),
            i32::from(pixel[1]),
            i32::from(pixel[2]),
        ];

        store_precision_10bit::<TGT>(target, x, channels, options);
    }
}

/// Reorders channels.
///
/// Target channel i is source channel `(PATTERN >> 4i) & 0xF`; a nibble that
/// addresses no source channel (e.g. `0xF`) writes the channel value instead.
pub fn shuffle_row_channels<const SRC: usize, const TGT: usize, const PATTERN: u32>(
    source: &[u8],
    target: &mut [u8],
    pixels: usize,
    options: &ConversionOptions,
) {
    if SRC == TGT && PATTERN == identity_pattern(SRC) {
        let elements = pixels * SRC;
        target[..elements].copy_from_slice(&source[..elements]);
        return;
    }

    for (pixel, value) in source
        .chunks_exact(SRC)
        .zip(target.chunks_exact_mut(TGT))
        .take(pixels)
    {
        for (index, channel) in value.iter_mut().enumerate() {
            let source_channel = ((PATTERN >> (4 * index)) & 0xF) as usize;
            *channel = if source_channel < SRC {
                pixel[source_channel]
            } else {
                options.channel_value
            };
        }
    }
}

/// Reverses the order of the first `pixels` pixels of a row
pub fn reverse_row_pixel_order_in_place<T: Copy, const CH: usize>(row: &mut [T], pixels: usize) {
    let row = &mut row[..pixels * CH];
    row.reverse();
    if CH > 1 {
        for pixel in row.chunks_exact_mut(CH) {
            pixel.reverse();
        }
    }
}

/// Swaps the first and third channel of each pixel of the row, in place
pub fn swap_row_channels_in_place<const CH: usize>(
    _sources: &[&[u8]],
    targets: &mut [&mut [u8]],
    width: u32,
    mirror: bool,
    _options: &ConversionOptions,
) {
    debug_assert!(!mirror);
    let [row] = targets else {
        debug_assert!(false, "one row expected");
        return;
    };

    for pixel in row.chunks_exact_mut(CH).take(width as usize) {
        pixel.swap(0, 2);
    }
}

/// Converts two RGB rows into two luma rows and one row of 2x2 downsampled chroma,
/// with 7 bit precision.
///
/// Luma follows [`convert_row_precision_7bit`]. Chroma of a block is the rounded
/// average `(sum_block sum_k f[c][k] * s[k] + 512 * b[c] + 256) >> 9`.
///
/// Targets are the two luma rows then either one interleaved chroma row
/// (`CHROMA_PLANES == 1`) or one row per chroma channel (`CHROMA_PLANES == 2`).
pub fn convert_two_rows_rgb_to_yuv420<const SRC: usize, const CHROMA_PLANES: usize>(
    sources: &[&[u8]],
    targets: &mut [&mut [u8]],
    width: u32,
    mirror: bool,
    options: &ConversionOptions,
) {
    let ([source0, source1], [luma0, luma1, chroma @ ..]) = (sources, targets) else {
        debug_assert!(false, "unexpected rows");
        return;
    };

    let width = width as usize;
    let factors = &options.factors;
    let biases = &options.biases;

    for block in 0..width / 2 {
        let x = 2 * block;
        let pixels = [
            &source0[x * SRC..],
            &source0[(x + 1) * SRC..],
            &source1[x * SRC..],
            &source1[(x + 1) * SRC..],
        ];

        let left = mirror_index(x, width, mirror);
        let right = mirror_index(x + 1, width, mirror);
        luma0[left] = fix7_to_u8(weighted_sum(factors, 0, pixels[0]), biases[0]);
        luma0[right] = fix7_to_u8(weighted_sum(factors, 0, pixels[1]), biases[0]);
        luma1[left] = fix7_to_u8(weighted_sum(factors, 0, pixels[2]), biases[0]);
        luma1[right] = fix7_to_u8(weighted_sum(factors, 0, pixels[3]), biases[0]);

        let first: i32 = pixels.iter().map(|p| weighted_sum(factors, 1, p)).sum();
        let second: i32 = pixels.iter().map(|p| weighted_sum(factors, 2, p)).sum();
        store_chroma_pair::<CHROMA_PLANES>(
            chroma,
            mirror_index(block, width / 2, mirror),
            fix7x4_to_u8(first, biases[1]),
            fix7x4_to_u8(second, biases[2]),
        );
    }
}

/// Converts two luma rows and their 2x2 downsampled chroma into two RGB rows,
/// with 6 bit precision (see [`convert_row_precision_6bit`]).
///
/// Sources are the two luma rows then one interleaved chroma row or two chroma
/// rows, depending on `CHROMA_PLANES`.
pub fn convert_two_rows_yuv420_to_rgb_precision_6bit<
    const CHROMA_PLANES: usize,
    const TGT: usize,
>(
    sources: &[&[u8]],
    targets: &mut [&mut [u8]],
    width: u32,
    mirror: bool,
    options: &ConversionOptions,
) {
    let ([luma0, luma1, chroma @ ..], [target0, target1]) = (sources, targets) else {
        debug_assert!(false, "unexpected rows");
        return;
    };

    let width = width as usize;
    let biases = &options.biases;

    for block in 0..width / 2 {
        let (first, second) = load_chroma_pair::<CHROMA_PLANES>(chroma, block);
        let first = i32::from(first) - biases[1];
        let second = i32::from(second) - biases[2];

        for x in 2 * block..2 * block + 2 {
            let tx = mirror_index(x, width, mirror);
            let channels = [i32::from(luma0[x]) - biases[0], first, second];
            store_precision_6bit::<TGT>(target0, tx, channels, options);

            let channels = [i32::from(luma1[x]) - biases[0], first, second];
            store_precision_6bit::<TGT>(target1, tx, channels, options);
        }
    }
}

/// Same as [`convert_two_rows_yuv420_to_rgb_precision_6bit`], with 10 bit precision
/// (see [`convert_row_precision_10bit`])
pub fn convert_two_rows_yuv420_to_rgb_precision_10bit<
    const CHROMA_PLANES: usize,
    const TGT: usize,
>(
    sources: &[&[u8]],
    targets: &mut [&mut [u8]],
    width: u32,
    mirror: bool,
    options: &ConversionOptions,
) {
    let ([luma0, luma1, chroma @ ..], [target0, target1]) = (sources, targets) else {
        debug_assert!(false, "unexpected rows");
        return;
    };

    let width = width as usize;

    for block in 0..width / 2 {
        let (first, second) = load_chroma_pair::<CHROMA_PLANES>(chroma, block);
        let first = i32::from(first);
        let second = i32::from(second);

        for x in 2 * block..2 * block + 2 {
            let tx = mirror_index(x, width, mirror);
            store_precision_10bit::<TGT>(
                target0,
                tx,
                [i32::from(luma0[x]), first, second],
                options,
            );
            store_precision_10bit::<TGT>(
                target1,
                tx,
                [i32::from(luma1[x]), first, second],
                options,
            );
        }
    }
}

/// Upsamples two rows of 4:2:0 data into two interleaved 3 channel rows.
///
/// Each chroma pair is replicated over its 2x2 block. `SWAP` exchanges the two chroma
/// channels, e.g. to write YVU from UV data.
pub fn map_two_rows_yuv420_to_yuv24<const CHROMA_PLANES: usize, const SWAP: bool>(
    sources: &[&[u8]],
    targets: &mut [&mut [u8]],
    width: u32,
    mirror: bool,
    _options: &ConversionOptions,
) {
    let ([luma0, luma1, chroma @ ..], [target0, target1]) = (sources, targets) else {
        debug_assert!(false, "unexpected rows");
        return;
    };

    let width = width as usize;
    for block in 0..width / 2 {
        let (first, second) = load_chroma_pair::<CHROMA_PLANES>(chroma, block);
        let (first, second) = if SWAP {
            (second, first)
        } else {
            (first, second)
        };

        for x in 2 * block..2 * block + 2 {
            let tx = 3 * mirror_index(x, width, mirror);
            target0[tx..tx + 3].copy_from_slice(&[luma0[x], first, second]);
            target1[tx..tx + 3].copy_from_slice(&[luma1[x], first, second]);
        }
    }
}

/// Re-packs two rows of 4:2:0 data between the interleaved and the planar chroma
/// layouts, luma is copied
pub fn map_two_rows_yuv420<const SOURCE_CHROMA_PLANES: usize, const TARGET_CHROMA_PLANES: usize>(
    sources: &[&[u8]],
    targets: &mut [&mut [u8]],
    width: u32,
    mirror: bool,
    _options: &ConversionOptions,
) {
    let ([luma0, luma1, source_chroma @ ..], [target0, target1, target_chroma @ ..]) =
        (sources, targets)
    else {
        debug_assert!(false, "unexpected rows");
        return;
    };

    let width = width as usize;
    copy_row(luma0, target0, width, mirror);
    copy_row(luma1, target1, width, mirror);

    for block in 0..width / 2 {
        let (first, second) = load_chroma_pair::<SOURCE_CHROMA_PLANES>(source_chroma, block);
        store_chroma_pair::<TARGET_CHROMA_PLANES>(
            target_chroma,
            mirror_index(block, width / 2, mirror),
            first,
            second,
        );
    }
}

/// Downsamples two YUV rows into two luma rows plus one U row and one V row.
///
/// Chroma of a 2x2 block is `(a + b + c + d + 2) >> 2`.
pub fn map_two_rows_yuv24_to_y_u_v12(
    sources: &[&[u8]],
    targets: &mut [&mut [u8]],
    width: u32,
    mirror: bool,
    _options: &ConversionOptions,
) {
    let ([source0, source1], [luma0, luma1, u, v]) = (sources, targets) else {
        debug_assert!(false, "unexpected rows");
        return;
    };

    let width = width as usize;
    for block in 0..width / 2 {
        let x = 2 * block;
        for dx in 0..2 {
            let tx = mirror_index(x + dx, width, mirror);
            luma0[tx] = source0[3 * (x + dx)];
            luma1[tx] = source1[3 * (x + dx)];
        }

        let average = |channel: usize| {
            let sum = u32::from(source0[3 * x + channel])
                + u32::from(source0[3 * x + 3 + channel])
                + u32::from(source1[3 * x + channel])
                + u32::from(source1[3 * x + 3 + channel]);
            ((sum + 2) >> 2) as u8
        };

        let tx = mirror_index(block, width / 2, mirror);
        u[tx] = average(1);
        v[tx] = average(2);
    }
}

/// Converts one row of packed 4:2:2 data (Y U Y V) into YUV, replicating chroma
pub fn map_row_yuyv16_to_yuv24(
    sources: &[&[u8]],
    targets: &mut [&mut [u8]],
    width: u32,
    mirror: bool,
    _options: &ConversionOptions,
) {
    let ([source], [target]) = (sources, targets) else {
        debug_assert!(false, "unexpected rows");
        return;
    };

    let width = width as usize;
    for (block, group) in source.chunks_exact(4).take(width / 2).enumerate() {
        let (y0, u, y1, v) = (group[0], group[1], group[2], group[3]);
        let left = 3 * mirror_index(2 * block, width, mirror);
        let right = 3 * mirror_index(2 * block + 1, width, mirror);
        target[left..left + 3].copy_from_slice(&[y0, u, v]);
        target[right..right + 3].copy_from_slice(&[y1, u, v]);
    }
}

/// Converts one row of packed 4:2:2 data (Y U Y V) into RGB with 10 bit precision
pub fn convert_row_yuyv16_to_rgb_precision_10bit<const TGT: usize>(
    sources: &[&[u8]],
    targets: &mut [&mut [u8]],
    width: u32,
    mirror: bool,
    options: &ConversionOptions,
) {
    let ([source], [target]) = (sources, targets) else {
        debug_assert!(false, "unexpected rows");
        return;
    };

    let width = width as usize;
    for (block, group) in source.chunks_exact(4).take(width / 2).enumerate() {
        let u = i32::from(group[1]);
        let v = i32::from(group[3]);
        for (dx, luma) in [group[0], group[2]].into_iter().enumerate() {
            let tx = mirror_index(2 * block + dx, width, mirror);
            store_precision_10bit::<TGT>(target, tx, [i32::from(luma), u, v], options);
        }
    }
}

/// Unpacks four 10 bit values stored in five bytes: the upper eight bits of each
/// value, then one byte with the two lower bits of each value, first value in the
/// least significant bits
#[inline(always)]
fn unpack_y10_group(group: &[u8]) -> [u16; 4] {
    let low = u16::from(group[4]);
    [
        (u16::from(group[0]) << 2) | (low & 0b11),
        (u16::from(group[1]) << 2) | ((low >> 2) & 0b11),
        (u16::from(group[2]) << 2) | ((low >> 4) & 0b11),
        (u16::from(group[3]) << 2) | (low >> 6),
    ]
}

/// Converts one row of packed 10 bit luma into 8 bit luma, keeping the upper bits
pub fn unpack_row_y10_packed_to_y8(
    sources: &[&[u8]],
    targets: &mut [&mut [u8]],
    width: u32,
    mirror: bool,
    _options: &ConversionOptions,
) {
    let ([source], [target]) = (sources, targets) else {
        debug_assert!(false, "unexpected rows");
        return;
    };

    let width = width as usize;
    for (group_index, group) in source.chunks_exact(5).take(width / 4).enumerate() {
        for (index, value) in group[..4].iter().enumerate() {
            target[mirror_index(4 * group_index + index, width, mirror)] = *value;
        }
    }
}

/// Converts one row of packed 10 bit luma into 16 bit elements holding 10 bit values,
/// in native byte order
pub fn unpack_row_y10_packed_to_y10(
    sources: &[&[u8]],
    targets: &mut [&mut [u8]],
    width: u32,
    mirror: bool,
    _options: &ConversionOptions,
) {
    let ([source], [target]) = (sources, targets) else {
        debug_assert!(false, "unexpected rows");
        return;
    };

    let width = width as usize;
    for (group_index, group) in source.chunks_exact(5).take(width / 4).enumerate() {
        for (index, value) in unpack_y10_group(group).into_iter().enumerate() {
            let tx = 2 * mirror_index(4 * group_index + index, width, mirror);
            target[tx..tx + 2].copy_from_slice(&value.to_ne_bytes());
        }
    }
}

/// Converts one row of packed 10 bit luma into grey RGB, keeping the upper bits
pub fn unpack_row_y10_packed_to_rgb24(
    sources: &[&[u8]],
    targets: &mut [&mut [u8]],
    width: u32,
    mirror: bool,
    _options: &ConversionOptions,
) {
    let ([source], [target]) = (sources, targets) else {
        debug_assert!(false, "unexpected rows");
        return;
    };

    let width = width as usize;
    for (group_index, group) in source.chunks_exact(5).take(width / 4).enumerate() {
        for (index, value) in group[..4].iter().enumerate() {
            let tx = 3 * mirror_index(4 * group_index + index, width, mirror);
            target[tx..tx + 3].fill(*value);
        }
    }
}
