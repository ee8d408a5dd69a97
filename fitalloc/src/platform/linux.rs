//! Implementation of Linux specific calls.

use core::{alloc::Layout, ptr, ptr::NonNull};

use fitalloc_core::{self, Configuration, PowerOf2};

/// Implementation of the Configuration trait, for Linux.
#[derive(Default)]
pub(crate) struct FitConfiguration;

impl Configuration for FitConfiguration {
    const ARENA_ALIGNMENT: PowerOf2 = unsafe { PowerOf2::new_unchecked(64) };
}

/// Implementation of the Platform trait, for Linux.
#[derive(Default)]
pub(crate) struct FitPlatform;

impl FitPlatform {
    /// Creates an instance.
    pub(crate) const fn new() -> Self { Self }
}

impl fitalloc_core::Platform for FitPlatform {
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        const ALIGNMENT: PowerOf2 = FitConfiguration::ARENA_ALIGNMENT;

        assert!(layout.size() % ALIGNMENT == 0,
            "Incorrect size: {} % {} != 0", layout.size(), ALIGNMENT.value());

        //  `mmap` returns page-aligned memory, which covers any alignment up to a page.
        debug_assert!(layout.align() <= 4096,
            "Incorrect alignment: {} > 4096", layout.align());

        mmap_allocate(layout.size())
    }

    unsafe fn deallocate(&self, pointer: NonNull<u8>, layout: Layout) {
        munmap_deallocate(pointer.as_ptr(), layout.size());
    }
}

//  Wrapper around `mmap`.
//
//  Returns a pointer to `size` bytes of zeroed, page-aligned memory.
fn mmap_allocate(size: usize) -> Option<NonNull<u8>> {
    let length = size;
    let prot = libc::PROT_READ | libc::PROT_WRITE;
    let flags = libc::MAP_PRIVATE | libc::MAP_ANONYMOUS;

    //  No specific address hint.
    let addr = ptr::null_mut();
    //  When used in conjunction with MAP_ANONYMOUS, fd is mandated to be -1 on some implementations.
    let fd = -1;
    //  When used in conjunction with MAP_ANONYMOUS, offset is mandated to be 0 on some implementations.
    let offset = 0;

    //  Safety:
    //  -   `addr`, `fd`, and `offset` are suitable for MAP_ANONYMOUS.
    let result = unsafe { libc::mmap(addr, length, prot, flags, fd, offset) };

    let result = if result != libc::MAP_FAILED { result as *mut u8 } else { ptr::null_mut() };
    NonNull::new(result)
}

//  Wrapper around `munmap`.
//
//  #   Panics
//
//  If `munmap` returns a non-0 result.
//
//  #   Safety
//
//  -   Assumes that `addr` points to a `mmap`ed area of at least `size` bytes.
//  -   Assumes that the range `[addr, addr + size)` is no longer in use.
unsafe fn munmap_deallocate(addr: *mut u8, size: usize) {
    let result = libc::munmap(addr as *mut libc::c_void, size);
    assert!(result == 0, "Could not munmap {:x}, {}: {}", addr as usize, size, result);
}
