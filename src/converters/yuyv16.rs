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
use super::{convert_luma_plane, convert_planes};
use crate::conversion_flag::ConversionFlag;
use crate::convert_image::common::{Y_UV12_TO_BGR24_PRECISION_10BIT, Y_UV12_TO_RGB24_PRECISION_10BIT};
use crate::convert_image::generic::{PlaneShape, RowsKernel};
use crate::convert_image::x86;
use crate::options::ConversionOptions;
use crate::pixel_format::PixelFormat;
use crate::worker::Worker;
use crate::ErrorKind;

const YUYV16_TO_YUV24: RowsKernel = RowsKernel {
    sources: &[PlaneShape::full(2, 1)],
    targets: &[PlaneShape::full(3, 1)],
    image_rows_per_iteration: 1,
    function: x86::map_row_yuyv16_to_yuv24,
};

const YUYV16_TO_RGB24: RowsKernel = RowsKernel {
    function: x86::convert_row_yuyv16_to_rgb_precision_10bit::<3>,
    ..YUYV16_TO_YUV24
};

fn convert_yuyv16(
    source: &[u8],
    target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    target_format: PixelFormat,
    padding_elements: [u32; 2],
    kernel: &RowsKernel,
    options: &ConversionOptions,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_planes(
        &[source],
        &mut [target],
        width,
        height,
        flag,
        (PixelFormat::YUYV16, target_format),
        &padding_elements,
        kernel,
        options,
        worker,
    )
}

/// Extracts the luma channel of YUYV16
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_yuyv16_to_y8(
    source: &[u8],
    target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    source_padding_elements: u32,
    target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_luma_plane::<2>(
        &[source],
        target,
        width,
        height,
        flag,
        PixelFormat::YUYV16,
        &[source_padding_elements],
        target_padding_elements,
        worker,
    )
}

/// Converts YUYV16 into YUV24, each chroma pair covers two horizontal pixels
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_yuyv16_to_yuv24(
    source: &[u8],
    target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    source_padding_elements: u32,
    target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_yuyv16(
        source,
        target,
        width,
        height,
        flag,
        PixelFormat::YUV24,
        [source_padding_elements, target_padding_elements],
        &YUYV16_TO_YUV24,
        &ConversionOptions::default(),
        worker,
    )
}

/// Converts limited range YUYV16 into full range RGB24, BT.601, with 10 bit precision
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_yuyv16_to_rgb24(
    source: &[u8],
    target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    source_padding_elements: u32,
    target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_yuyv16(
        source,
        target,
        width,
        height,
        flag,
        PixelFormat::RGB24,
        [source_padding_elements, target_padding_elements],
        &YUYV16_TO_RGB24,
        &Y_UV12_TO_RGB24_PRECISION_10BIT,
        worker,
    )
}

/// Converts limited range YUYV16 into full range BGR24, BT.601, with 10 bit precision
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_yuyv16_to_bgr24(
    source: &[u8],
    target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    source_padding_elements: u32,
    target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_yuyv16(
        source,
        target,
        width,
        height,
        flag,
        PixelFormat::BGR24,
        [source_padding_elements, target_padding_elements],
        &YUYV16_TO_RGB24,
        &Y_UV12_TO_BGR24_PRECISION_10BIT,
        worker,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_and_chroma() {
        let source = [16u8, 100, 235, 200, 50, 110, 60, 120];
        let mut y = [0u8; 4];
        let mut yuv = [0u8; 12];

        convert_yuyv16_to_y8(&source, &mut y, 2, 2, ConversionFlag::Mirrored, 0, 0, None)
            .unwrap();
        assert_eq!(y, [235, 16, 60, 50]);

        convert_yuyv16_to_yuv24(&source, &mut yuv, 2, 2, ConversionFlag::Normal, 0, 0, None)
            .unwrap();
        assert_eq!(yuv, [16, 100, 200, 235, 100, 200, 50, 110, 120, 60, 110, 120]);
    }
}
