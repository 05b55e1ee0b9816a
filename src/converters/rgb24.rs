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
use super::{convert_planes, CHROMA_ROW, INTERLEAVED_CHROMA_ROW, LUMA_ROW_PAIR};
use crate::conversion_flag::ConversionFlag;
use crate::convert_image::common::{
    RGB24_TO_Y8, RGB24_TO_YUV24, RGB24_TO_YUV24_FULL_RANGE, RGB24_TO_YVU24,
};
use crate::convert_image::generic::{PlaneShape, RowsKernel};
use crate::convert_image::x86;
use crate::options::ConversionOptions;
use crate::pixel_format::PixelFormat;
use crate::worker::Worker;
use crate::ErrorKind;

const RGB24_TO_Y_UV12: RowsKernel = RowsKernel {
    sources: &[PlaneShape::full(3, 2)],
    targets: &[LUMA_ROW_PAIR, INTERLEAVED_CHROMA_ROW],
    image_rows_per_iteration: 2,
    function: x86::convert_two_rows_rgb_to_yuv420::<3, 1>,
};

const RGB24_TO_Y_U_V12: RowsKernel = RowsKernel {
    sources: &[PlaneShape::full(3, 2)],
    targets: &[LUMA_ROW_PAIR, CHROMA_ROW, CHROMA_ROW],
    image_rows_per_iteration: 2,
    function: x86::convert_two_rows_rgb_to_yuv420::<3, 2>,
};

const SWAP_RGB24_IN_PLACE: RowsKernel = RowsKernel {
    sources: &[],
    targets: &[PlaneShape::full(3, 1)],
    image_rows_per_iteration: 1,
    function: x86::swap_row_channels_in_place::<3>,
};

single_plane_conversion! {
    /// Converts RGB24 into BGR24
    convert_rgb24_to_bgr24: RGB24 -> BGR24,
    x86::shuffle_row_channels::<3, 3, 0x012>, 3, ConversionOptions::default()
}

single_plane_conversion! {
    /// Copies RGB24 into RGB24, applying the conversion flag
    convert_rgb24_to_rgb24: RGB24 -> RGB24,
    x86::shuffle_row_channels::<3, 3, 0x210>, 3, ConversionOptions::default()
}

single_plane_conversion! {
    /// Converts RGB24 into RGBA32, alpha receives `channel_value`
    convert_rgb24_to_rgba32: RGB24 -> RGBA32,
    x86::shuffle_row_channels::<3, 4, 0xF210>, 4, ConversionOptions::default(), channel_value
}

single_plane_conversion! {
    /// Converts RGB24 into BGRA32, alpha receives `channel_value`
    convert_rgb24_to_bgra32: RGB24 -> BGRA32,
    x86::shuffle_row_channels::<3, 4, 0xF012>, 4, ConversionOptions::default(), channel_value
}

single_plane_conversion! {
    /// Converts RGB24 into ARGB32, alpha receives `channel_value`
    convert_rgb24_to_argb32: RGB24 -> ARGB32,
    x86::shuffle_row_channels::<3, 4, 0x210F>, 4, ConversionOptions::default(), channel_value
}

single_plane_conversion! {
    /// Converts RGB24 into full range Y8, with 7 bit precision:
    ///
    /// Y = (38 R + 75 G + 15 B + 64) / 128
    convert_rgb24_to_y8: RGB24 -> Y8,
    x86::convert_row_precision_7bit::<3, 1>, 1, RGB24_TO_Y8
}

/// Converts full range RGB24 into limited range YUV24, BT.601, with 7 bit precision:
///
/// ```text
/// | Y |   | 33  64  13 |   | R |   |  16 |
/// | U | = |-19 -37  56 | * | G | + | 128 |  / 128, rounded
/// | V |   | 56 -47  -9 |   | B |   | 128 |
/// ```
///
/// Uses the vectorized row kernel of the running cpu when there is one.
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_rgb24_to_yuv24(
    source: &[u8],
    target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    source_padding_elements: u32,
    target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    super::convert_single_plane(
        source,
        target,
        width,
        height,
        flag,
        (PixelFormat::RGB24, PixelFormat::YUV24),
        (source_padding_elements, target_padding_elements),
        crate::rgb24_to_yuv24_row_function(),
        x86::reverse_row_pixel_order_in_place::<u8, 3>,
        &RGB24_TO_YUV24,
        worker,
    )
}

fn convert_rgb24_to_yuv420(
    source: &[u8],
    targets: &mut [&mut [u8]],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    target_format: PixelFormat,
    padding_elements: &[u32],
    options: &ConversionOptions,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    let kernel = if targets.len() == 2 {
        &RGB24_TO_Y_UV12
    } else {
        &RGB24_TO_Y_U_V12
    };

    convert_planes(
        &[source],
        targets,
        width,
        height,
        flag,
        (PixelFormat::RGB24, target_format),
        padding_elements,
        kernel,
        options,
        worker,
    )
}

/// Converts full range RGB24 into limited range Y_UV12, BT.601.
///
/// Luma follows [`convert_rgb24_to_yuv24`]; chroma is the rounded average of each
/// 2x2 block.
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_rgb24_to_y_uv12(
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
    convert_rgb24_to_yuv420(
        source,
        &mut [y_target, uv_target],
        width,
        height,
        flag,
        PixelFormat::Y_UV12,
        &[
            source_padding_elements,
            y_target_padding_elements,
            uv_target_padding_elements,
        ],
        &RGB24_TO_YUV24,
        worker,
    )
}

/// Converts full range RGB24 into limited range Y_VU12, BT.601
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_rgb24_to_y_vu12(
    source: &[u8],
    y_target: &mut [u8],
    vu_target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    source_padding_elements: u32,
    y_target_padding_elements: u32,
    vu_target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_rgb24_to_yuv420(
        source,
        &mut [y_target, vu_target],
        width,
        height,
        flag,
        PixelFormat::Y_VU12,
        &[
            source_padding_elements,
            y_target_padding_elements,
            vu_target_padding_elements,
        ],
        &RGB24_TO_YVU24,
        worker,
    )
}

/// Converts full range RGB24 into full range Y_UV12, BT.601:
///
/// ```text
/// | Y |   | 38  75  15 |   | R |   |   0 |
/// | U | = |-22 -42  64 | * | G | + | 128 |  / 128, rounded
/// | V |   | 64 -54 -10 |   | B |   | 128 |
/// ```
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_rgb24_to_y_uv12_full_range(
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
    convert_rgb24_to_yuv420(
        source,
        &mut [y_target, uv_target],
        width,
        height,
        flag,
        PixelFormat::Y_UV12_FULL_RANGE,
        &[
            source_padding_elements,
            y_target_padding_elements,
            uv_target_padding_elements,
        ],
        &RGB24_TO_YUV24_FULL_RANGE,
        worker,
    )
}

/// Converts full range RGB24 into limited range Y_U_V12 (three planes), BT.601
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_rgb24_to_y_u_v12(
    source: &[u8],
    y_target: &mut [u8],
    u_target: &mut [u8],
    v_target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    source_padding_elements: u32,
    y_target_padding_elements: u32,
    u_target_padding_elements: u32,
    v_target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_rgb24_to_yuv420(
        source,
        &mut [y_target, u_target, v_target],
        width,
        height,
        flag,
        PixelFormat::Y_U_V12,
        &[
            source_padding_elements,
            y_target_padding_elements,
            u_target_padding_elements,
            v_target_padding_elements,
        ],
        &RGB24_TO_YUV24,
        worker,
    )
}

/// Converts full range RGB24 into limited range Y_V_U12 (three planes), BT.601
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_rgb24_to_y_v_u12(
    source: &[u8],
    y_target: &mut [u8],
    v_target: &mut [u8],
    u_target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    source_padding_elements: u32,
    y_target_padding_elements: u32,
    v_target_padding_elements: u32,
    u_target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_rgb24_to_yuv420(
        source,
        &mut [y_target, v_target, u_target],
        width,
        height,
        flag,
        PixelFormat::Y_V_U12,
        &[
            source_padding_elements,
            y_target_padding_elements,
            v_target_padding_elements,
            u_target_padding_elements,
        ],
        &RGB24_TO_YVU24,
        worker,
    )
}

/// Swaps the red and blue channels of an RGB24 frame in place, the frame becomes BGR24
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn change_rgb24_to_bgr24(
    frame: &mut [u8],
    width: u32,
    height: u32,
    padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_planes(
        &[],
        &mut [frame],
        width,
        height,
        ConversionFlag::Normal,
        (PixelFormat::RGB24, PixelFormat::BGR24),
        &[padding_elements],
        &SWAP_RGB24_IN_PLACE,
        &ConversionOptions::default(),
        worker,
    )
}
