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
use super::{convert_planes, INTERLEAVED_CHROMA_ROW, LUMA_ROW_PAIR};
use crate::conversion_flag::ConversionFlag;
use crate::convert_image::common::{RGB24_TO_Y8, RGB24_TO_YUV24};
use crate::convert_image::generic::{PlaneShape, RowsKernel};
use crate::convert_image::x86;
use crate::options::ConversionOptions;
use crate::pixel_format::PixelFormat;
use crate::worker::Worker;
use crate::ErrorKind;

const RGBA32_TO_Y_UV12: RowsKernel = RowsKernel {
    sources: &[PlaneShape::full(4, 2)],
    targets: &[LUMA_ROW_PAIR, INTERLEAVED_CHROMA_ROW],
    image_rows_per_iteration: 2,
    function: x86::convert_two_rows_rgb_to_yuv420::<4, 1>,
};

single_plane_conversion! {
    /// Converts RGBA32 into RGB24, alpha is dropped
    convert_rgba32_to_rgb24: RGBA32 -> RGB24,
    x86::shuffle_row_channels::<4, 3, 0x210>, 3, ConversionOptions::default()
}

single_plane_conversion! {
    /// Converts RGBA32 into BGR24, alpha is dropped
    convert_rgba32_to_bgr24: RGBA32 -> BGR24,
    x86::shuffle_row_channels::<4, 3, 0x012>, 3, ConversionOptions::default()
}

single_plane_conversion! {
    /// Copies RGBA32 into RGBA32, applying the conversion flag
    convert_rgba32_to_rgba32: RGBA32 -> RGBA32,
    x86::shuffle_row_channels::<4, 4, 0x3210>, 4, ConversionOptions::default()
}

single_plane_conversion! {
    /// Converts RGBA32 into BGRA32
    convert_rgba32_to_bgra32: RGBA32 -> BGRA32,
    x86::shuffle_row_channels::<4, 4, 0x3012>, 4, ConversionOptions::default()
}

single_plane_conversion! {
    /// Converts RGBA32 into full range Y8 with 7 bit precision, alpha is ignored
    convert_rgba32_to_y8: RGBA32 -> Y8,
    x86::convert_row_precision_7bit::<4, 1>, 1, RGB24_TO_Y8
}

single_plane_conversion! {
    /// Converts RGBA32 into limited range YUV24, BT.601, alpha is ignored
    convert_rgba32_to_yuv24: RGBA32 -> YUV24,
    x86::convert_row_precision_7bit::<4, 3>, 3, RGB24_TO_YUV24
}

/// Converts full range RGBA32 into limited range Y_UV12, BT.601, alpha is ignored
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_rgba32_to_y_uv12(
    source: &[u8],
    y_target: &mut [u8],
    uv_target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    source_padding_elements: u32,
    y_target_padding_elements: u32,
    uv_target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_planes(
        &[source],
        &mut [y_target, uv_target],
        width,
        height,
        flag,
        (PixelFormat::RGBA32, PixelFormat::Y_UV12),
        &[
            source_padding_elements,
            y_target_padding_elements,
            uv_target_padding_elements,
        ],
        &RGBA32_TO_Y_UV12,
        &RGB24_TO_YUV24,
        worker,
    )
}
