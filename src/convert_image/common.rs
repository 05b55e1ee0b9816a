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
use crate::options::ConversionOptions;

/// Saturates to [0, 255]
#[inline(always)]
pub fn clamp_u8(x: i32) -> u8 {
    x.clamp(0, 255) as u8
}

/// Fixed point with 7 fractional bits back to uchar, rounded
///
/// sum is the weighted sum of the source channels, bias is added in integer units
#[inline(always)]
pub fn fix7_to_u8(sum: i32, bias: i32) -> u8 {
    clamp_u8((sum + (bias << 7) + 64) >> 7)
}

/// Average of four fixed point values with 7 fractional bits, rounded
#[inline(always)]
pub fn fix7x4_to_u8(sum: i32, bias: i32) -> u8 {
    clamp_u8((sum + (bias << 9) + 256) >> 9)
}

/// Fixed point with 6 fractional bits back to uchar, truncated toward zero
#[inline(always)]
pub fn fix6_to_u8(sum: i32) -> u8 {
    clamp_u8(sum / 64)
}

/// Fixed point with 10 fractional bits back to uchar, truncated toward zero before
/// the bias is added
#[inline(always)]
pub fn fix10_to_u8(sum: i32, bias: i32) -> u8 {
    clamp_u8(sum / 1024 + bias)
}

/// Mirrored position of a pixel when `mirror` is set
#[inline(always)]
pub fn mirror_index(x: usize, width: usize, mirror: bool) -> usize {
    if mirror {
        width - 1 - x
    } else {
        x
    }
}

pub const Y_MIN: i32 = 16;
pub const C_HALF: i32 = 128;
pub const DEFAULT_ALPHA: u8 = 255;

// RGB to limited range YUV, BT.601, 7 bit
pub const RGB24_TO_YUV24: ConversionOptions = ConversionOptions::matrix(
    [33, -19, 56, 64, -37, -47, 13, 56, -9],
    [Y_MIN, C_HALF, C_HALF],
);

pub const RGB24_TO_YVU24: ConversionOptions = ConversionOptions::matrix(
    [33, 56, -19, 64, -47, -37, 13, -9, 56],
    [Y_MIN, C_HALF, C_HALF],
);

pub const BGR24_TO_YUV24: ConversionOptions = ConversionOptions::matrix(
    [13, 56, -9, 64, -37, -47, 33, -19, 56],
    [Y_MIN, C_HALF, C_HALF],
);

// RGB to full range YUV, BT.601, 7 bit
pub const RGB24_TO_YUV24_FULL_RANGE: ConversionOptions = ConversionOptions::matrix(
    [38, -22, 64, 75, -42, -54, 15, 64, -10],
    [0, C_HALF, C_HALF],
);

// RGB to full range luma, 7 bit, first row only
pub const RGB24_TO_Y8: ConversionOptions =
    ConversionOptions::matrix([38, 0, 0, 75, 0, 0, 15, 0, 0], [0, 0, 0]);

pub const BGR24_TO_Y8: ConversionOptions =
    ConversionOptions::matrix([15, 0, 0, 75, 0, 0, 38, 0, 0], [0, 0, 0]);

// Limited range YUV to RGB, 10 bit. Fitted to the rounded 7 bit RGB24_TO_YUV24
// matrix, a RGB24 round trip is off by at most 2 (4 with the BT.601 10 bit values)
pub const YUV24_TO_RGB24: ConversionOptions = ConversionOptions::matrix(
    [1192, 1192, 1192, -14, -412, 2064, 1634, -842, -2],
    [-221, 138, -276],
);

pub const YUV24_TO_BGR24: ConversionOptions = ConversionOptions::matrix(
    [1192, 1192, 1192, 2064, -412, -14, -2, -842, 1634],
    [-276, 138, -221],
);

// Full range YUV to RGB, 6 bit, biases subtracted from the source
pub const YUV24_TO_RGB24_PRECISION_6BIT: ConversionOptions = ConversionOptions::matrix(
    [64, 64, 64, 0, -22, 111, 88, -45, 0],
    [0, C_HALF, C_HALF],
);

pub const YUV24_TO_BGR24_PRECISION_6BIT: ConversionOptions = ConversionOptions::matrix(
    [64, 64, 64, 111, -22, 0, 0, -45, 88],
    [0, C_HALF, C_HALF],
);

// Limited range 4:2:0 to RGB, 6 bit, biases subtracted from the source
pub const Y_UV12_TO_RGB24_PRECISION_6BIT: ConversionOptions = ConversionOptions::matrix(
    [75, 75, 75, 0, -25, 128, 102, -52, 0],
    [Y_MIN, C_HALF, C_HALF],
);

pub const Y_UV12_TO_BGR24_PRECISION_6BIT: ConversionOptions = ConversionOptions::matrix(
    [75, 75, 75, 128, -25, 0, 0, -52, 102],
    [Y_MIN, C_HALF, C_HALF],
);

pub const Y_VU12_TO_RGB24_PRECISION_6BIT: ConversionOptions = ConversionOptions::matrix(
    [75, 75, 75, 102, -52, 0, 0, -25, 128],
    [Y_MIN, C_HALF, C_HALF],
);

pub const Y_VU12_TO_BGR24_PRECISION_6BIT: ConversionOptions = ConversionOptions::matrix(
    [75, 75, 75, 0, -52, 102, 128, -25, 0],
    [Y_MIN, C_HALF, C_HALF],
);

// Limited range 4:2:0 and 4:2:2 to RGB, 10 bit
pub const Y_UV12_TO_RGB24_PRECISION_10BIT: ConversionOptions = ConversionOptions::matrix(
    [1192, 1192, 1192, 0, -400, 2066, 1634, -833, 0],
    [-223, 135, -277],
);

pub const Y_UV12_TO_BGR24_PRECISION_10BIT: ConversionOptions = ConversionOptions::matrix(
    [1192, 1192, 1192, 2066, -400, 0, 0, -833, 1634],
    [-277, 135, -223],
);

// Full range 4:2:0 to RGB, 6 bit
pub const Y_UV12_FULL_RANGE_TO_RGB24_PRECISION_6BIT: ConversionOptions =
    ConversionOptions::matrix([64, 64, 64, 0, -22, 113, 90, -46, 0], [0, C_HALF, C_HALF]);

pub const Y_UV12_FULL_RANGE_TO_BGR24_PRECISION_6BIT: ConversionOptions =
    ConversionOptions::matrix([64, 64, 64, 113, -22, 0, 0, -46, 90], [0, C_HALF, C_HALF]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(fix7_to_u8(63, 0), 0);
        assert_eq!(fix7_to_u8(64, 0), 1);
        assert_eq!(fix7_to_u8(-1000, 0), 0);
        assert_eq!(fix7_to_u8(255 * 128, 16), 255);
        assert_eq!(fix6_to_u8(127), 1);
        assert_eq!(fix6_to_u8(-127), 0);
        assert_eq!(fix10_to_u8(-1023, 5), 5);
        assert_eq!(fix7x4_to_u8(4 * 64 * 100, 0), 50);
    }
}
