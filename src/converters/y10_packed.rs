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
use super::convert_planes;
use crate::conversion_flag::ConversionFlag;
use crate::convert_image::generic::{PlaneShape, RowsKernel};
use crate::convert_image::x86;
use crate::options::ConversionOptions;
use crate::pixel_format::PixelFormat;
use crate::worker::Worker;
use crate::ErrorKind;

// Four pixels are stored in five bytes
const Y10_PACKED_ROW: [PlaneShape; 1] = [PlaneShape::full(1, 1).with_width_ratio(5, 4)];

const Y10_PACKED_TO_Y8: RowsKernel = RowsKernel {
    sources: &Y10_PACKED_ROW,
    targets: &[PlaneShape::full(1, 1)],
    image_rows_per_iteration: 1,
    function: x86::unpack_row_y10_packed_to_y8,
};

const Y10_PACKED_TO_Y10: RowsKernel = RowsKernel {
    sources: &Y10_PACKED_ROW,
    targets: &[PlaneShape::full(1, 1).with_element_bytes(2)],
    image_rows_per_iteration: 1,
    function: x86::unpack_row_y10_packed_to_y10,
};

const Y10_PACKED_TO_RGB24: RowsKernel = RowsKernel {
    sources: &Y10_PACKED_ROW,
    targets: &[PlaneShape::full(3, 1)],
    image_rows_per_iteration: 1,
    function: x86::unpack_row_y10_packed_to_rgb24,
};

/// Converts packed 10 bit luma into Y8, keeping the eight most significant bits.
///
/// Each group of four pixels is stored in five bytes: the upper eight bits of each
/// pixel, then one byte holding the two lower bits of every pixel.
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_y10_packed_to_y8(
    source: &[u8],
    target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    source_padding_elements: u32,
    target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_planes(
        &[source],
        &mut [target],
        width,
        height,
        flag,
        (PixelFormat::Y10_PACKED, PixelFormat::Y8),
        &[source_padding_elements, target_padding_elements],
        &Y10_PACKED_TO_Y8,
        &ConversionOptions::default(),
        worker,
    )
}

/// Converts packed 10 bit luma into Y10, one 16 bit element per pixel.
///
/// `target_padding_elements` counts 16 bit elements.
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_y10_packed_to_y10(
    source: &[u8],
    target: &mut [u16],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    source_padding_elements: u32,
    target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    let target: &mut [u8] = bytemuck::cast_slice_mut(target);
    convert_planes(
        &[source],
        &mut [target],
        width,
        height,
        flag,
        (PixelFormat::Y10_PACKED, PixelFormat::Y10),
        &[source_padding_elements, target_padding_elements],
        &Y10_PACKED_TO_Y10,
        &ConversionOptions::default(),
        worker,
    )
}

/// Converts packed 10 bit luma into grey RGB24, keeping the eight most significant bits
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_y10_packed_to_rgb24(
    source: &[u8],
    target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    source_padding_elements: u32,
    target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    convert_planes(
        &[source],
        &mut [target],
        width,
        height,
        flag,
        (PixelFormat::Y10_PACKED, PixelFormat::RGB24),
        &[source_padding_elements, target_padding_elements],
        &Y10_PACKED_TO_RGB24,
        &ConversionOptions::default(),
        worker,
    )
}

/// Converts packed 10 bit luma into grey BGR24, keeping the eight most significant bits
///
/// # Errors
///
/// See the [module documentation](index.html)
pub fn convert_y10_packed_to_bgr24(
    source: &[u8],
    target: &mut [u8],
    width: u32,
    height: u32,
    flag: ConversionFlag,
    source_padding_elements: u32,
    target_padding_elements: u32,
    worker: Option<&Worker>,
) -> Result<(), ErrorKind> {
    // Grey pixels have the same channel values in either order
    convert_planes(
        &[source],
        &mut [target],
        width,
        height,
        flag,
        (PixelFormat::Y10_PACKED, PixelFormat::BGR24),
        &[source_padding_elements, target_padding_elements],
        &Y10_PACKED_TO_RGB24,
        &ConversionOptions::default(),
        worker,
    )
}
