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

/// Maximum number of planes a conversion reads and writes in total
pub const MAX_CONVERSION_PLANES: usize = 6;

/// Parameters of one conversion.
///
/// Kernels read only the fields their documentation names; the rest keep their
/// defaults.
///
/// `factors` is a 3x3 fixed point matrix stored column major: the element at
/// `row + 3 * column` multiplies source channel `column` into target channel `row`.
/// The denominator (64, 128 or 1024) is implied by the kernel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct ConversionOptions {
    /// Padding at the end of each row, in elements, sources first then targets
    pub padding_elements: [u32; MAX_CONVERSION_PLANES],
    /// Multiplication factors, column major
    pub factors: [i32; 9],
    /// Bias of each channel
    pub biases: [i32; 3],
    /// Value written into a channel that has no source counterpart
    pub channel_value: u8,
}

impl ConversionOptions {
    /// Options carrying a color matrix and no padding
    pub const fn matrix(factors: [i32; 9], biases: [i32; 3]) -> Self {
        ConversionOptions {
            padding_elements: [0; MAX_CONVERSION_PLANES],
            factors,
            biases,
            channel_value: 0,
        }
    }

    /// Replaces the leading padding values, one per plane
    #[must_use]
    pub fn with_padding_elements(mut self, padding_elements: &[u32]) -> Self {
        for (dst, src) in self.padding_elements.iter_mut().zip(padding_elements) {
            *dst = *src;
        }

        self
    }

    /// Replaces the constant channel value
    #[must_use]
    pub const fn with_channel_value(mut self, channel_value: u8) -> Self {
        self.channel_value = channel_value;
        self
    }

    /// Factor mapping source channel `column` into target channel `row`
    #[inline(always)]
    pub const fn factor(&self, row: usize, column: usize) -> i32 {
        self.factors[row + 3 * column]
    }

    /// Padding of the given plane, in elements
    #[inline(always)]
    pub const fn padding(&self, plane: usize) -> u32 {
        self.padding_elements[plane]
    }
}
