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
use super::{convert_planes, CHROMA_ROW, LUMA_ROW_PAIR};
use crate::conversion_flag::ConversionFlag;
use crate::convert_image::common::{
    YUV24_TO_BGR24, YUV24_TO_BGR24_PRECISION_6BIT, YUV24_TO_RGB24,
    YUV24_TO_RGB24_PRECISION_6BIT,
};
use crate::convert_image::generic::{PlaneShape, RowsKernel};
use crate::convert_image::x86;
use crate::options::ConversionOptions;
use crate::pixel_format::PixelFormat;
use crate::worker::Worker;
use crate::ErrorKind;

const YUV24_TO_Y_U_V12: RowsKernel = RowsKernel {
    sources: &[PlaneShape::full(3, 2)],
    targets: &[LUMA_ROW_PAIR, CHROMA_ROW, CHROMA_ROW],
    image_rows_per_iteration: 2,
    function: x86::map_two_rows_yuv24_to_y_u_v12,
};

single_plane_conversion! {
    /// Converts limited range YUV24 into full range RGB24, BT.601, with 10 bit precision.
    ///
    /// The matrix inverts the one of [`convert_rgb24_to_yuv24`], a round trip stays
    /// within two levels per channel:
    ///
    /// ```text
    /// | R |   | 1192  -14  1634 |   | Y |          | -221 |
    /// | G | = | 1192 -412  -842 | * | U | / 1024 + |  138 |
    /// | B |   | 1192 2064    -2 |   | V |          | -276 |
    /// ```
    ///
    /// [`convert_rgb24_to_yuv24`]: fn.convert_rgb24_to_yuv24.html
    convert_yuv24_to_rgb24: YUV24 -> RGB24,
    x86::convert_row_precision_10bit::<3, 3>, 3, YUV24_TO_RGB24
}

single_plane_conversion! {
    /// Converts limited range YUV24 into full range BGR24, BT.601, with 10 bit precision
    convert_yuv24_to_bgr24: YUV24 -> BGR24,
    x86::convert_row_precision_10bit::<3, 3>, 3, YUV24_TO_BGR24
}

single_plane_conversion! {
    /// Converts full range YUV24 into RGB24 with 6 bit precision:
    ///
    /// ```text
    /// R = Y + 1.370705 * (V - 128)
    /// G = Y - 0.337633 * (U - 128) - 0.698001 * (V - 128)
    /// B = Y + 1.732446 * (U - 128)
    /// ```
    convert_yuv24_to_rgb24_precision_6bit: YUV24 -> RGB24,
    x86::convert_row_precision_6bit::<3, 3>, 3, YUV24_TO_RGB24_PRECISION_6BIT
}

single_plane_conversion! {
    /// Converts full range YUV24 into BGRA32 with 6 bit precision, alpha receives
    /// `channel_value`
    convert_yuv24_to_bgra32_precision_6bit: YUV24 -> BGRA32,
    x86::convert_row_precision_6bit::<3, 4>, 4, YUV24_TO_BGR24_PRECISION_6BIT, channel_value
}

single_plane_conversion! {
    /// Extracts the luma channel of YUV24
    convert_yuv24_to_y8: YUV24 -> Y8,
    x86::shuffle_row_channels::<3, 1, 0x0>, 1, ConversionOptions::default()
}

single_plane_conversion! {
    /// Copies YUV24 into YUV24, applying the conversion flag
    convert_yuv24_to_yuv24: YUV24 -> YUV24,
    x86::shuffle_row_channels::<3, 3, 0x210>, 3, ConversionOptions::default()
}

single_plane_conversion! {
    /// Converts YUV24 into YVU24
    convert_yuv24_to_yvu24: YUV24 -> YVU24,
    x86::shuffle_row_channels::<3, 3, 0x120>, 3, ConversionOptions::default()
}

/// Converts YUV24 into Y_U_V12, chroma of each 2x2 block is the rounded average
/// `(a + b + c + d + 2) / 4`
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_yuv24_to_y_u_v12(
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
    convert_planes(
        &[source],
        &mut [y_target, u_target, v_target],
        width,
        height,
        flag,
        (PixelFormat::YUV24, PixelFormat::Y_U_V12),
        &[
            source_padding_elements,
            y_target_padding_elements,
            u_target_padding_elements,
            v_target_padding_elements,
        ],
        &YUV24_TO_Y_U_V12,
        &ConversionOptions::default(),
        worker,
    )
}
