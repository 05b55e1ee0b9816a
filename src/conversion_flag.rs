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
use core::fmt;

/// Orientation applied while converting a frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub enum ConversionFlag {
    /// Rows and pixels keep their order
    #[default]
    Normal,
    /// The target is the vertical mirror of the source
    Flipped,
    /// Each target row holds the source pixels right to left
    Mirrored,
    /// Both `Flipped` and `Mirrored`
    FlippedAndMirrored,
}

impl ConversionFlag {
    /// All the flags, in declaration order
    pub const ALL: [ConversionFlag; 4] = [
        ConversionFlag::Normal,
        ConversionFlag::Flipped,
        ConversionFlag::Mirrored,
        ConversionFlag::FlippedAndMirrored,
    ];

    /// Builds a flag out of its vertical and horizontal parts
    pub const fn from_parts(flipped: bool, mirrored: bool) -> ConversionFlag {
        match (flipped, mirrored) {
            (false, false) => ConversionFlag::Normal,
            (true, false) => ConversionFlag::Flipped,
            (false, true) => ConversionFlag::Mirrored,
            (true, true) => ConversionFlag::FlippedAndMirrored,
        }
    }

    /// Returns whether rows are written bottom to top
    pub const fn is_flipped(self) -> bool {
        matches!(
            self,
            ConversionFlag::Flipped | ConversionFlag::FlippedAndMirrored
        )
    }

    /// Returns whether pixels are written right to left
    pub const fn is_mirrored(self) -> bool {
        matches!(
            self,
            ConversionFlag::Mirrored | ConversionFlag::FlippedAndMirrored
        )
    }

    /// Inverts the vertical part of the flag, keeping the horizontal one
    pub const fn toggle_flip(self) -> ConversionFlag {
        ConversionFlag::from_parts(!self.is_flipped(), self.is_mirrored())
    }
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for ConversionFlag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConversionFlag::Normal => write!(f, "normal"),
            ConversionFlag::Flipped => write!(f, "flipped"),
            ConversionFlag::Mirrored => write!(f, "mirrored"),
            ConversionFlag::FlippedAndMirrored => write!(f, "flipped-and-mirrored"),
        }
    }
}
