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
use core::arch::x86::__cpuid;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::__cpuid;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn edx_features() -> u32 {
    unsafe {
        if __cpuid(0).eax == 0 {
            0
        } else {
            __cpuid(1).edx
        }
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn edx_features() -> u32 {
    0
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // The sse2 row kernels are compiled only when the build host reports sse2,
    // so that no illegal instruction can be emitted for the machine that builds.
    if (edx_features() & (1 << 26)) != 0 {
        println!("cargo:rustc-cfg=target_feature=\"sse2\"");
    }
}
