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
use crate::convert_image::common::BGR24_TO_Y8;
use crate::convert_image::x86;
use crate::options::ConversionOptions;

single_plane_conversion! {
    /// Converts BGRA32 into RGB24, alpha is dropped
    convert_bgra32_to_rgb24: BGRA32 -> RGB24,
    x86::shuffle_row_channels::<4, 3, 0x012>, 3, ConversionOptions::default()
}

single_plane_conversion! {
    /// Converts BGRA32 into BGR24, alpha is dropped
    convert_bgra32_to_bgr24: BGRA32 -> BGR24,
    x86::shuffle_row_channels::<4, 3, 0x210>, 3, ConversionOptions::default()
}

single_plane_conversion! {
    /// Converts BGRA32 into RGBA32
    convert_bgra32_to_rgba32: BGRA32 -> RGBA32,
    x86::shuffle_row_channels::<4, 4, 0x3012>, 4, ConversionOptions::default()
}

single_plane_conversion! {
    /// Converts BGRA32 into full range Y8 with 7 bit precision, alpha is ignored
    convert_bgra32_to_y8: BGRA32 -> Y8,
    x86::convert_row_precision_7bit::<4, 1>, 1, BGR24_TO_Y8
}
