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
use super::{convert_luma_plane, convert_planes, CHROMA_ROW, INTERLEAVED_CHROMA_ROW, LUMA_ROW_PAIR};
use crate::conversion_flag::ConversionFlag;
use crate::convert_image::common::{
    Y_UV12_FULL_RANGE_TO_BGR24_PRECISION_6BIT, Y_UV12_FULL_RANGE_TO_RGB24_PRECISION_6BIT,
    Y_UV12_TO_BGR24_PRECISION_6BIT, Y_UV12_TO_RGB24_PRECISION_10BIT,
    Y_UV12_TO_RGB24_PRECISION_6BIT,
};
use crate::convert_image::generic::{PlaneShape, RowsKernel};
use crate::convert_image::x86;
use crate::options::ConversionOptions;
use crate::pixel_format::PixelFormat;
use crate::worker::Worker;
use crate::ErrorKind;

const Y_UV12: [PlaneShape; 2] = [LUMA_ROW_PAIR, INTERLEAVED_CHROMA_ROW];
const RGB24_ROW_PAIR: [PlaneShape; 1] = [PlaneShape::full(3, 2)];

const Y_UV12_TO_YUV24: RowsKernel = RowsKernel {
    sources: &Y_UV12,
    targets: &RGB24_ROW_PAIR,
    image_rows_per_iteration: 2,
    function: x86::map_two_rows_yuv420_to_yuv24::<1, false>,
};

const Y_UV12_TO_YVU24: RowsKernel = RowsKernel {
    function: x86::map_two_rows_yuv420_to_yuv24::<1, true>,
    ..Y_UV12_TO_YUV24
};

const Y_UV12_TO_Y_U_V12: RowsKernel = RowsKernel {
    sources: &Y_UV12,
    targets: &[LUMA_ROW_PAIR, CHROMA_ROW, CHROMA_ROW],
    image_rows_per_iteration: 2,
    function: x86::map_two_rows_yuv420::<1, 2>,
};

const Y_UV12_TO_RGB24_6BIT: RowsKernel = RowsKernel {
    function: x86::convert_two_rows_yuv420_to_rgb_precision_6bit::<1, 3>,
    ..Y_UV12_TO_YUV24
};

const Y_UV12_TO_RGB24_10BIT: RowsKernel = RowsKernel {
    function: x86::convert_two_rows_yuv420_to_rgb_precision_10bit::<1, 3>,
    ..Y_UV12_TO_YUV24
};

/// Extracts the luma plane of Y_UV12
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_y_uv12_to_y8(
    y_source: &[u8],
    uv_source: &[u8],
    target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    y_source_padding_elements: u32,
    uv_source_padding_elements: u32,
    target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_luma_plane::<1>(
        &[y_source, uv_source],
        target,
        width,
        height,
        flag,
        PixelFormat::Y_UV12,
        &[y_source_padding_elements, uv_source_padding_elements],
        target_padding_elements,
        worker,
    )
}

semi_planar_conversion! {
    /// Upsamples Y_UV12 into YUV24, each chroma pair covers its 2x2 block
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_uv12_to_yuv24: Y_UV12 [y, uv] -> YUV24,
    Y_UV12_TO_YUV24, ConversionOptions::default()
}

semi_planar_conversion! {
    /// Upsamples Y_UV12 into YVU24
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_uv12_to_yvu24: Y_UV12 [y, uv] -> YVU24,
    Y_UV12_TO_YVU24, ConversionOptions::default()
}

/// Splits the interleaved chroma plane of Y_UV12 into the two chroma planes of Y_U_V12
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_y_uv12_to_y_u_v12(
    y_source: &[u8],
    uv_source: &[u8],
    y_target: &mut [u8],
    u_target: &mut [u8],
    v_target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    y_source_padding_elements: u32,
    uv_source_padding_elements: u32,
    y_target_padding_elements: u32,
    u_target_padding_elements: u32,
    v_target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_planes(
        &[y_source, uv_source],
        &mut [y_target, u_target, v_target],
        width,
        height,
        flag,
        (PixelFormat::Y_UV12, PixelFormat::Y_U_V12),
        &[
            y_source_padding_elements,
            uv_source_padding_elements,
            y_target_padding_elements,
            u_target_padding_elements,
            v_target_padding_elements,
        ],
        &Y_UV12_TO_Y_U_V12,
        &ConversionOptions::default(),
        worker,
    )
}

semi_planar_conversion! {
    /// Converts limited range Y_UV12 into full range RGB24, BT.601, with 6 bit
    /// precision:
    ///
    /// ```text
    /// | R |   | 75    0   102 |   | Y -  16 |
    /// | G | = | 75  -25   -52 | * | U - 128 | / 64
    /// | B |   | 75  128     0 |   | V - 128 |
    /// ```
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_uv12_limited_range_to_rgb24: Y_UV12 [y, uv] -> RGB24,
    Y_UV12_TO_RGB24_6BIT, Y_UV12_TO_RGB24_PRECISION_6BIT
}

semi_planar_conversion! {
    /// Converts limited range Y_UV12 into full range BGR24, BT.601, with 6 bit precision
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_uv12_limited_range_to_bgr24: Y_UV12 [y, uv] -> BGR24,
    Y_UV12_TO_RGB24_6BIT, Y_UV12_TO_BGR24_PRECISION_6BIT
}

semi_planar_conversion! {
    /// Converts limited range Y_UV12 into full range RGB24, BT.601, with 10 bit
    /// precision:
    ///
    /// ```text
    /// | R |   | 1192     0  1634 |   | Y |          | -223 |
    /// | G | = | 1192  -400  -833 | * | U | / 1024 + |  135 |
    /// | B |   | 1192  2066     0 |   | V |          | -277 |
    /// ```
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_uv12_limited_range_to_rgb24_precision_10bit: Y_UV12 [y, uv] -> RGB24,
    Y_UV12_TO_RGB24_10BIT, Y_UV12_TO_RGB24_PRECISION_10BIT
}

semi_planar_conversion! {
    /// Converts full range Y_UV12 into RGB24, BT.601, with 6 bit precision
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_uv12_full_range_to_rgb24: Y_UV12_FULL_RANGE [y, uv] -> RGB24,
    Y_UV12_TO_RGB24_6BIT, Y_UV12_FULL_RANGE_TO_RGB24_PRECISION_6BIT
}

semi_planar_conversion! {
    /// Converts full range Y_UV12 into BGR24, BT.601, with 6 bit precision
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_uv12_full_range_to_bgr24: Y_UV12_FULL_RANGE [y, uv] -> BGR24,
    Y_UV12_TO_RGB24_6BIT, Y_UV12_FULL_RANGE_TO_BGR24_PRECISION_6BIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chroma_is_replicated() {
        let y = [1u8, 2, 3, 4];
        let uv = [10u8, 20];
        let mut target = [0u8; 12];
        convert_y_uv12_to_yvu24(
            &y,
            &uv,
            &mut target,
            2,
            2,
            ConversionFlag::Flipped,
            0,
            0,
            0,
            None,
        )
        .unwrap();
        assert_eq!(target, [3, 20, 10, 4, 20, 10, 1, 20, 10, 2, 20, 10]);
    }
}
