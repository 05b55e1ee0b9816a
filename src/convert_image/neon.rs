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
#![allow(clippy::wildcard_imports)] // We are importing everything
use crate::convert_image::common::*;
use crate::convert_image::x86;
use crate::options::ConversionOptions;

use core::arch::aarch64::*;

const RGB_TO_YUV_WG_SIZE: usize = 8;
const RGB_TO_YUV_WG_BYTES: usize = 3 * RGB_TO_YUV_WG_SIZE;

/// Weighted sum plus bias, then rounded shift by 7 with unsigned saturation (8-wide)
///
/// Every partial sum fits a short for the BT.601 weights, final values lie in
/// [2104, 30664] before the shift.
#[inline(always)]
unsafe fn affine_transform(
    red: int16x8_t,
    green: int16x8_t,
    blue: int16x8_t,
    row: usize,
) -> uint8x8_t {
    let options = &RGB24_TO_YUV24;
    let mut sum = vdupq_n_s16((options.biases[row] << 7) as i16);
    sum = vmlaq_n_s16(sum, red, options.factor(row, 0) as i16);
    sum = vmlaq_n_s16(sum, green, options.factor(row, 1) as i16);
    sum = vmlaq_n_s16(sum, blue, options.factor(row, 2) as i16);
    vqrshrun_n_s16::<7>(sum)
}

#[inline(always)]
unsafe fn widen(x: uint8x8_t) -> int16x8_t {
    vreinterpretq_s16_u16(vmovl_u8(x))
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

    for (pixels, value) in source
        .chunks_exact(RGB_TO_YUV_WG_BYTES)
        .zip(target.chunks_exact_mut(RGB_TO_YUV_WG_BYTES))
    {
        // Neon is mandatory on aarch64, both chunks hold 24 bytes
        unsafe {
            let rgb = vld3_u8(pixels.as_ptr());
            let (red, green, blue) = (widen(rgb.0), widen(rgb.1), widen(rgb.2));
            let yuv = uint8x8x3_t(
                affine_transform(red, green, blue, 0),
                affine_transform(red, green, blue, 1),
                affine_transform(red, green, blue, 2),
            );
            vst3_u8(value.as_mut_ptr(), yuv);
        }
    }

    x86::convert_row_precision_7bit::<3, 3>(
        source_tail,
        target_tail,
        pixels - groups * RGB_TO_YUV_WG_SIZE,
        options,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_as_scalar() {
        let mut rng = rand::thread_rng();
        for pixels in 0..64 {
            let source: Vec<u8> = (0..3 * pixels).map(|_| rng.gen()).collect();
            let mut expected = vec![0u8; 3 * pixels];
            let mut actual = vec![0u8; 3 * pixels];

            x86::convert_row_precision_7bit::<3, 3>(&source, &mut expected, pixels, &RGB24_TO_YUV24);
            convert_row_rgb24_to_yuv24(&source, &mut actual, pixels, &RGB24_TO_YUV24);
            assert_eq!(expected, actual, "pixels: {pixels}");
        }
    }
}
