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
    Y_UV12_FULL_RANGE_TO_RGB24_PRECISION_6BIT, Y_UV12_TO_BGR24_PRECISION_10BIT,
    Y_UV12_TO_BGR24_PRECISION_6BIT, Y_UV12_TO_RGB24_PRECISION_10BIT,
    Y_UV12_TO_RGB24_PRECISION_6BIT,
};
use crate::convert_image::generic::{PlaneShape, RowsKernel};
use crate::convert_image::x86;
use crate::options::ConversionOptions;
use crate::pixel_format::PixelFormat;
use crate::worker::Worker;
use crate::ErrorKind;

const Y_U_V12: [PlaneShape; 3] = [LUMA_ROW_PAIR, CHROMA_ROW, CHROMA_ROW];

const Y_U_V12_TO_YUV24: RowsKernel = RowsKernel {
    sources: &Y_U_V12,
    targets: &[PlaneShape::full(3, 2)],
    image_rows_per_iteration: 2,
    function: x86::map_two_rows_yuv420_to_yuv24::<2, false>,
};

const Y_U_V12_TO_YVU24: RowsKernel = RowsKernel {
    function: x86::map_two_rows_yuv420_to_yuv24::<2, true>,
    ..Y_U_V12_TO_YUV24
};

const Y_U_V12_TO_RGB24_10BIT: RowsKernel = RowsKernel {
    function: x86::convert_two_rows_yuv420_to_rgb_precision_10bit::<2, 3>,
    ..Y_U_V12_TO_YUV24
};

const Y_U_V12_TO_RGB24_6BIT: RowsKernel = RowsKernel {
    function: x86::convert_two_rows_yuv420_to_rgb_precision_6bit::<2, 3>,
    ..Y_U_V12_TO_YUV24
};

const Y_U_V12_TO_RGBA32_6BIT: RowsKernel = RowsKernel {
    sources: &Y_U_V12,
    targets: &[PlaneShape::full(4, 2)],
    image_rows_per_iteration: 2,
    function: x86::convert_two_rows_yuv420_to_rgb_precision_6bit::<2, 4>,
};

const Y_U_V12_TO_Y_UV12: RowsKernel = RowsKernel {
    sources: &Y_U_V12,
    targets: &[LUMA_ROW_PAIR, INTERLEAVED_CHROMA_ROW],
    image_rows_per_iteration: 2,
    function: x86::map_two_rows_yuv420::<2, 1>,
};

const Y_U_V12_TO_Y_U_V12: RowsKernel = RowsKernel {
    sources: &Y_U_V12,
    targets: &Y_U_V12,
    image_rows_per_iteration: 2,
    function: x86::map_two_rows_yuv420::<2, 2>,
};

/// Extracts the luma plane of Y_U_V12
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_y_u_v12_to_y8(
    y_source: &[u8],
    u_source: &[u8],
    v_source: &[u8],
    target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    y_source_padding_elements: u32,
    u_source_padding_elements: u32,
    v_source_padding_elements: u32,
    target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_luma_plane::<1>(
        &[y_source, u_source, v_source],
        target,
        width,
        height,
        flag,
        PixelFormat::Y_U_V12,
        &[
            y_source_padding_elements,
            u_source_padding_elements,
            v_source_padding_elements,
        ],
        target_padding_elements,
        worker,
    )
}

planar_conversion! {
    /// Upsamples Y_U_V12 into YUV24, each chroma pair covers its 2x2 block
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_u_v12_to_yuv24: Y_U_V12 [y, u, v] -> YUV24,
    Y_U_V12_TO_YUV24, ConversionOptions::default()
}

planar_conversion! {
    /// Upsamples Y_U_V12 into YVU24
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_u_v12_to_yvu24: Y_U_V12 [y, u, v] -> YVU24,
    Y_U_V12_TO_YVU24, ConversionOptions::default()
}

/// Interleaves the two chroma planes of Y_U_V12 into the chroma plane of Y_UV12
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_y_u_v12_to_y_uv12(
    y_source: &[u8],
    u_source: &[u8],
    v_source: &[u8],
    y_target: &mut [u8],
    uv_target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    y_source_padding_elements: u32,
    u_source_padding_elements: u32,
    v_source_padding_elements: u32,
    y_target_padding_elements: u32,
    uv_target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_planes(
        &[y_source, u_source, v_source],
        &mut [y_target, uv_target],
        width,
        height,
        flag,
        (PixelFormat::Y_U_V12, PixelFormat::Y_UV12),
        &[
            y_source_padding_elements,
            u_source_padding_elements,
            v_source_padding_elements,
            y_target_padding_elements,
            uv_target_padding_elements,
        ],
        &Y_U_V12_TO_Y_UV12,
        &ConversionOptions::default(),
        worker,
    )
}

/// Copies Y_U_V12 into Y_U_V12, applying the conversion flag
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_y_u_v12_to_y_u_v12(
    y_source: &[u8],
    u_source: &[u8],
    v_source: &[u8],
    y_target: &mut [u8],
    u_target: &mut [u8],
    v_target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    y_source_padding_elements: u32,
    u_source_padding_elements: u32,
    v_source_padding_elements: u32,
    y_target_padding_elements: u32,
    u_target_padding_elements: u32,
    v_target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_planes(
        &[y_source, u_source, v_source],
        &mut [y_target, u_target, v_target],
        width,
        height,
        flag,
        (PixelFormat::Y_U_V12, PixelFormat::Y_U_V12),
        &[
            y_source_padding_elements,
            u_source_padding_elements,
            v_source_padding_elements,
            y_target_padding_elements,
            u_target_padding_elements,
            v_target_padding_elements,
        ],
        &Y_U_V12_TO_Y_U_V12,
        &ConversionOptions::default(),
        worker,
    )
}

planar_conversion! {
    /// Converts limited range Y_U_V12 into full range RGB24, BT.601, with 10 bit
    /// precision
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_u_v12_limited_range_to_rgb24: Y_U_V12 [y, u, v] -> RGB24,
    Y_U_V12_TO_RGB24_10BIT, Y_UV12_TO_RGB24_PRECISION_10BIT
}

planar_conversion! {
    /// Converts limited range Y_U_V12 into full range BGR24, BT.601, with 10 bit
    /// precision
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_u_v12_limited_range_to_bgr24: Y_U_V12 [y, u, v] -> BGR24,
    Y_U_V12_TO_RGB24_10BIT, Y_UV12_TO_BGR24_PRECISION_10BIT
}

planar_conversion! {
    /// Converts limited range Y_U_V12 into full range RGBA32, BT.601, with 6 bit
    /// precision, alpha receives `channel_value`
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_u_v12_limited_range_to_rgba32: Y_U_V12 [y, u, v] -> RGBA32,
    Y_U_V12_TO_RGBA32_6BIT, Y_UV12_TO_RGB24_PRECISION_6BIT, channel_value
}

planar_conversion! {
    /// Converts limited range Y_U_V12 into full range BGRA32, BT.601, with 6 bit
    /// precision, alpha receives `channel_value`
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_u_v12_limited_range_to_bgra32: Y_U_V12 [y, u, v] -> BGRA32,
    Y_U_V12_TO_RGBA32_6BIT, Y_UV12_TO_BGR24_PRECISION_6BIT, channel_value
}

planar_conversion! {
    /// Converts full range Y_U_V12 into RGB24, BT.601, with 6 bit precision
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_u_v12_full_range_to_rgb24: Y_U_V12_FULL_RANGE [y, u, v] -> RGB24,
    Y_U_V12_TO_RGB24_6BIT, Y_UV12_FULL_RANGE_TO_RGB24_PRECISION_6BIT
}
