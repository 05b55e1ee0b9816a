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
#[cfg(target_arch = "x86")]
use core::arch::x86::{CpuidResult, __cpuid};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{CpuidResult, __cpuid};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CpuManufacturer {
    Unknown,
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    Intel,
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    Amd,
    #[cfg(target_arch = "aarch64")]
    Arm,
}

/// Best row kernel family the running cpu can execute
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(unused)]
pub enum InstructionSet {
    X86,
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    Sse2,
    #[cfg(target_arch = "aarch64")]
    Neon,
}

impl InstructionSet {
    /// Name accepted by `initialize_with_instruction_set`
    pub const fn name(self) -> &'static str {
        match self {
            InstructionSet::X86 => "x86",
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            InstructionSet::Sse2 => "sse2",
            #[cfg(target_arch = "aarch64")]
            InstructionSet::Neon => "neon",
        }
    }
}

/// Vendor identification string, as laid out in ebx, edx and ecx of leaf 0
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn vendor(leaf: &CpuidResult) -> [u8; 12] {
    let mut name = [0; 12];
    name[..4].copy_from_slice(&leaf.ebx.to_le_bytes());
    name[4..8].copy_from_slice(&leaf.edx.to_le_bytes());
    name[8..].copy_from_slice(&leaf.ecx.to_le_bytes());
    name
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub fn get() -> (CpuManufacturer, InstructionSet) {
    // SAFETY: cpuid is available on every x86_64 and on any x86 able to run std
    let leaf = unsafe { __cpuid(0) };
    if leaf.eax == 0 {
        return (CpuManufacturer::Unknown, InstructionSet::X86);
    }

    let manufacturer = match &vendor(&leaf) {
        b"GenuineIntel" => CpuManufacturer::Intel,
        b"AuthenticAMD" | b"AMDisbetter!" => CpuManufacturer::Amd,
        _ => CpuManufacturer::Unknown,
    };

    // Hardware sse2 only, never software emulation
    let edx = unsafe { __cpuid(1) }.edx;
    let set = if (edx & (1 << 26)) == 0 {
        InstructionSet::X86
    } else {
        InstructionSet::Sse2
    };

    (manufacturer, set)
}

#[cfg(target_arch = "aarch64")]
pub fn get() -> (CpuManufacturer, InstructionSet) {
    // Advanced SIMD is part of the armv8-a base profile
    (CpuManufacturer::Arm, InstructionSet::Neon)
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
pub fn get() -> (CpuManufacturer, InstructionSet) {
    (CpuManufacturer::Unknown, InstructionSet::X86)
}
