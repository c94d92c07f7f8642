use libc::c_char;
use std::ffi::{CString, NulError};
use std::ptr;

/// A null-terminated array of C strings for passing to PROJ functions.
///
/// Used for option lists (`KEY=VALUE`), search paths and proj-string argument
/// vectors. Strings are converted when added, and the pointer array is kept
/// null-terminated as it grows, so it is valid to hand out at any time.
pub(crate) struct CStringArray {
    /// Owns the CString data.
    cstrings: Vec<CString>,
    /// Null-terminated pointer array, maintained incrementally as strings are added.
    ptrs: Vec<*const c_char>,
}

impl CStringArray {
    pub fn new() -> Self {
        Self {
            cstrings: Vec::new(),
            ptrs: vec![ptr::null()],
        }
    }

    /// Build an array from `items`, failing on the first interior nul byte.
    pub fn try_from_iter<I, S>(items: I) -> Result<Self, NulError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut array = Self::new();
        for item in items {
            array.push(item)?;
        }
        Ok(array)
    }

    /// Adds a string to the array.
    ///
    /// Returns an error if the string contains an interior nul byte.
    pub fn push(&mut self, s: impl Into<String>) -> Result<(), NulError> {
        debug_assert_eq!(self.ptrs.last(), Some(&ptr::null()));
        debug_assert_eq!(self.ptrs.len(), self.cstrings.len() + 1);

        let cstring = CString::new(s.into())?;
        // Moving the CString into `cstrings` does not move its heap buffer.
        self.ptrs.insert(self.ptrs.len() - 1, cstring.as_ptr());
        self.cstrings.push(cstring);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cstrings.len()
    }

    /// Returns a pointer to a null-terminated array of C string pointers,
    /// or null if the list is empty.
    ///
    /// PROJ documents NULL as "no options", and an empty array must never be
    /// dereferenced, so the empty case never exposes the terminator slot.
    pub fn as_ptr(&self) -> *const *const c_char {
        debug_assert_eq!(self.ptrs.last(), Some(&ptr::null()));
        debug_assert_eq!(self.ptrs.len(), self.cstrings.len() + 1);
        if self.cstrings.is_empty() {
            ptr::null()
        } else {
            self.ptrs.as_ptr()
        }
    }

    /// The array as a C `argv`. PROJ reads but never writes through it.
    pub fn as_argv(&self) -> *mut *mut c_char {
        self.as_ptr().cast_mut().cast()
    }
}

impl Default for CStringArray {
    fn default() -> Self {
        Self::new()
    }
}

/// A `PROJ_STRING_LIST` returned by PROJ, destroyed on drop.
pub(crate) struct NativeStringList(proj_sys::PROJ_STRING_LIST);

impl NativeStringList {
    /// Take ownership of `list`, or `None` if PROJ returned null.
    ///
    /// # Safety
    ///
    /// `list` must be null or a list allocated by PROJ that nothing else will free.
    pub unsafe fn from_raw(list: proj_sys::PROJ_STRING_LIST) -> Option<Self> {
        (!list.is_null()).then_some(NativeStringList(list))
    }

    /// Copy every entry up to the null terminator.
    pub fn to_vec(&self) -> Result<Vec<String>, std::str::Utf8Error> {
        let mut strings = Vec::new();
        let mut cursor = self.0;
        loop {
            // Safety: the list is null-terminated, so every slot up to and including
            // the terminator is readable.
            let entry = unsafe { *cursor };
            if entry.is_null() {
                break;
            }
            strings.push(unsafe { crate::_string(entry) }?);
            cursor = unsafe { cursor.add(1) };
        }
        Ok(strings)
    }
}

impl Drop for NativeStringList {
    fn drop(&mut self) {
        unsafe { proj_sys::proj_string_list_destroy(self.0) };
    }
}
