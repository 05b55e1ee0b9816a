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
use crate::pixel_format::PixelFormat;
use crate::static_assert;

const fn upper_power_of_two(x: u32) -> u32 {
    1 << (32 - (x - 1).leading_zeros())
}

const LO_PIXEL_FORMAT_ID: u32 = PixelFormat::ABGR32.id();
const HI_PIXEL_FORMAT_ID: u32 = PixelFormat::F64.id();
static_assert!(LO_PIXEL_FORMAT_ID == 1);

const ROWS: u32 = HI_PIXEL_FORMAT_ID + 1;
const COLUMNS: u32 = upper_power_of_two(ROWS);
static_assert!(COLUMNS >= ROWS && COLUMNS < 2 * ROWS);

pub const TABLE_SIZE: usize = (ROWS * COLUMNS) as usize;

/// Row (or column) of a pixel format in the dispatch table.
///
/// Only predefined formats have one: the identifier is the index.
pub fn get_image_index(pixel_format: PixelFormat) -> Option<u32> {
    let id = pixel_format.id();
    if id.wrapping_sub(LO_PIXEL_FORMAT_ID) <= HI_PIXEL_FORMAT_ID - LO_PIXEL_FORMAT_ID {
        Some(id)
    } else {
        None
    }
}

pub const fn get_index(src_index: u32, dst_index: u32) -> usize {
    (src_index * COLUMNS + dst_index) as usize
}

/// Table position of a conversion between two predefined formats
pub fn get_conversion_index(source: PixelFormat, target: PixelFormat) -> Option<usize> {
    Some(get_index(
        get_image_index(source)?,
        get_image_index(target)?,
    ))
}
