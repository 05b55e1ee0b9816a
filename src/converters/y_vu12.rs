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
use super::{convert_luma_plane, INTERLEAVED_CHROMA_ROW, LUMA_ROW_PAIR};
use crate::conversion_flag::ConversionFlag;
use crate::convert_image::common::{Y_VU12_TO_BGR24_PRECISION_6BIT, Y_VU12_TO_RGB24_PRECISION_6BIT};
use crate::convert_image::generic::{PlaneShape, RowsKernel};
use crate::convert_image::x86;
use crate::options::ConversionOptions;
use crate::pixel_format::PixelFormat;
use crate::worker::Worker;
use crate::ErrorKind;

const Y_VU12_TO_YUV24: RowsKernel = RowsKernel {
    sources: &[LUMA_ROW_PAIR, INTERLEAVED_CHROMA_ROW],
    targets: &[PlaneShape::full(3, 2)],
    image_rows_per_iteration: 2,
    function: x86::map_two_rows_yuv420_to_yuv24::<1, true>,
};

const Y_VU12_TO_YVU24: RowsKernel = RowsKernel {
    function: x86::map_two_rows_yuv420_to_yuv24::<1, false>,
    ..Y_VU12_TO_YUV24
};

// Chroma is read in memory order (V, U), the matrices account for it
const Y_VU12_TO_RGB24_6BIT: RowsKernel = RowsKernel {
    function: x86::convert_two_rows_yuv420_to_rgb_precision_6bit::<1, 3>,
    ..Y_VU12_TO_YUV24
};

/// Extracts the luma plane of Y_VU12
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_y_vu12_to_y8(
    y_source: &[u8],
    vu_source: &[u8],
    target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    y_source_padding_elements: u32,
    vu_source_padding_elements: u32,
    target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_luma_plane::<1>(
        &[y_source, vu_source],
        target,
        width,
        height,
        flag,
        PixelFormat::Y_VU12,
        &[y_source_padding_elements, vu_source_padding_elements],
        target_padding_elements,
        worker,
    )
}

semi_planar_conversion! {
    /// Upsamples Y_VU12 into YUV24
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_vu12_to_yuv24: Y_VU12 [y, vu] -> YUV24,
    Y_VU12_TO_YUV24, ConversionOptions::default()
}

semi_planar_conversion! {
    /// Upsamples Y_VU12 into YVU24
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_vu12_to_yvu24: Y_VU12 [y, vu] -> YVU24,
    Y_VU12_TO_YVU24, ConversionOptions::default()
}

semi_planar_conversion! {
    /// Converts limited range Y_VU12 into full range RGB24, BT.601, with 6 bit precision
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_vu12_limited_range_to_rgb24: Y_VU12 [y, vu] -> RGB24,
    Y_VU12_TO_RGB24_6BIT, Y_VU12_TO_RGB24_PRECISION_6BIT
}

semi_planar_conversion! {
    /// Converts limited range Y_VU12 into full range BGR24, BT.601, with 6 bit precision
    ///
    /// # Errors
    ///
    /// See the [module documentation](index.html)
    convert_y_vu12_limited_range_to_bgr24: Y_VU12 [y, vu] -> BGR24,
    Y_VU12_TO_RGB24_6BIT, Y_VU12_TO_BGR24_PRECISION_6BIT
}
