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
#![allow(clippy::wildcard_imports)]
use crate::convert_image::common::*;
use crate::convert_image::x86;
use crate::options::ConversionOptions;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

const RGB_TO_YUV_WG_SIZE: usize = 4;
const RGB_TO_YUV_WG_BYTES: usize = 3 * RGB_TO_YUV_WG_SIZE;

/// Packs two shorts into an int, x in the upper half
const fn i32x2_to_i32(x: i32, y: i32) -> i32 {
    let val = (((x & 0xFFFF) as u32) << 16) | ((y & 0xFFFF) as u32);
    val as i32
}

/// (green and red weights, blue weight, bias and rounding) of one target channel
const fn forward_weights(row: usize) -> (i32, i32, i32) {
    let options = RGB24_TO_YUV24;
    (
        i32x2_to_i32(options.factor(row, 1), options.factor(row, 0)),
        i32x2_to_i32(0, options.factor(row, 2)),
        (options.biases[row] << 7) + 64,
    )
}

const FORWARD_WEIGHTS: [(i32, i32, i32); 3] =
    [forward_weights(0), forward_weights(1), forward_weights(2)];

/// Deinterleave 4 rgb pixels into 2 pairs of short samples (4-wide)
///
/// image:      -------- r3g3b3r2 g2b2r1g1 b1r0g0b0 (r0 first in memory)
/// green_red:  --g3--r3 --g2--r2 --g1--r1 --g0--r0
/// green_blue: --g3--b3 --g2--b2 --g1--b1 --g0--b0
#[inline(always)]
unsafe fn unpack_ui8x3_i16x2_4x(image: *const u8) -> (__m128i, __m128i) {
    let line = _mm_set_epi32(
        0,
        image.add(8).cast::<i32>().read_unaligned(),
        image.add(4).cast::<i32>().read_unaligned(),
        image.cast::<i32>().read_unaligned(),
    );

    let aligned_line = _mm_unpacklo_epi64(
        _mm_unpacklo_epi32(line, _mm_srli_si128(line, 3)),
        _mm_unpacklo_epi32(_mm_srli_si128(line, 6), _mm_srli_si128(line, 9)),
    );

    let red = _mm_srli_epi32(_mm_slli_epi32(aligned_line, 24), 24);
    let blue = _mm_srli_epi32(_mm_slli_epi32(aligned_line, 8), 24);
    let green = _mm_srli_epi32(_mm_slli_epi32(_mm_srli_epi32(aligned_line, 8), 24), 8);

    (_mm_or_si128(red, green), _mm_or_si128(blue, green))
}

/// Perform affine transformation y = (Ax + b) >> 7 (4-wide)
#[inline(always)]
unsafe fn affine_transform(
    green_red: __m128i,
    green_blue: __m128i,
    weights: (i32, i32, i32),
) -> __m128i {
    _mm_srai_epi32(
        _mm_add_epi32(
            _mm_add_epi32(
                _mm_madd_epi16(green_red, _mm_set1_epi32(weights.0)),
                _mm_madd_epi16(green_blue, _mm_set1_epi32(weights.1)),
            ),
            _mm_set1_epi32(weights.2),
        ),
        7,
    )
}

#[target_feature(enable = "sse2")]
unsafe fn rgb_to_yuv_row(source: &[u8], target: &mut [u8]) {
    let mut packed = [0u8; 16];
    for (pixels, value) in source
        .chunks_exact(RGB_TO_YUV_WG_BYTES)
        .zip(target.chunks_exact_mut(RGB_TO_YUV_WG_BYTES))
    {
        let (green_red, green_blue) = unpack_ui8x3_i16x2_4x(pixels.as_ptr());
        let y = affine_transform(green_red, green_blue, FORWARD_WEIGHTS[0]);
        let u = affine_transform(green_red, green_blue, FORWARD_WEIGHTS[1]);
        let v = affine_transform(green_red, green_blue, FORWARD_WEIGHTS[2]);

        // y0y1y2y3 u0u1u2u3 v0v1v2v3 v0v1v2v3, saturated
        let yuv = _mm_packus_epi16(_mm_packs_epi32(y, u), _mm_packs_epi32(v, v));
        _mm_storeu_si128(packed.as_mut_ptr().cast::<__m128i>(), yuv);

        for (index, pixel) in value.chunks_exact_mut(3).enumerate() {
            pixel[0] = packed[index];
            pixel[1] = packed[RGB_TO_YUV_WG_SIZE + index];
            pixel[2] = packed[2 * RGB_TO_YUV_WG_SIZE + index];
        }
    }
}

/// RGB24 to limited range YUV24, BT.601, with the same rounding as
/// [`x86::convert_row_precision_7bit`]
pub fn convert_row_rgb24_to_yuv24(
    source: &[u8],
    target: &mut [u8],
    pixels: usize,
    options: &ConversionOptions,
) {
    debug_assert!(options.factors == RGB24_TO_YUV24.factors);

    let groups = pixels / RGB_TO_YUV_WG_SIZE;
    let (source, source_tail) = source.split_at(groups * RGB_TO_YUV_WG_BYTES);
    let (target, target_tail) = target.split_at_mut(groups * RGB_TO_YUV_WG_BYTES);

    // Only selected when the cpu reports sse2
    unsafe {
        rgb_to_yuv_row(source, target);
    }

    x86::convert_row_precision_7bit::<3, 3>(
        source_tail,
        target_tail,
        pixels - groups * RGB_TO_YUV_WG_SIZE,
        options,
    );
}
