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
use crate::convert_image::x86;
use crate::options::ConversionOptions;

single_plane_conversion! {
    /// Copies Y8 into Y8, applying the conversion flag
    convert_y8_to_y8: Y8 -> Y8,
    x86::shuffle_row_channels::<1, 1, 0x0>, 1, ConversionOptions::default()
}

single_plane_conversion! {
    /// Converts Y8 into grey RGB24
    convert_y8_to_rgb24: Y8 -> RGB24,
    x86::shuffle_row_channels::<1, 3, 0x000>, 3, ConversionOptions::default()
}

single_plane_conversion! {
    /// Converts Y8 into grey BGR24
    convert_y8_to_bgr24: Y8 -> BGR24,
    x86::shuffle_row_channels::<1, 3, 0x000>, 3, ConversionOptions::default()
}

single_plane_conversion! {
    /// Converts Y8 into grey RGBA32, alpha receives `channel_value`
    convert_y8_to_rgba32: Y8 -> RGBA32,
    x86::shuffle_row_channels::<1, 4, 0xF000>, 4, ConversionOptions::default(), channel_value
}
