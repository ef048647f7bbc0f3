//! Owner and group name resolution.
//!
//! [`IdentityCache`] maps numeric uids/gids to display names with a
//! get-or-resolve contract. Each id is resolved at most once per cache:
//! first through the thread-safe `getpwuid_r`/`getgrgid_r`, then through
//! `getent` as a fallback, and finally as the number itself.

use libc::{c_char, getgrgid_r, getpwuid_r, group, passwd};
use std::collections::HashMap;
use std::ffi::CStr;
use std::mem::MaybeUninit;
use std::process::Command;
use tracing::debug;

const LOOKUP_BUF_LEN: usize = 4096;

/// Cache of resolved user and group names, owned by the scanner.
#[derive(Debug, Default)]
pub struct IdentityCache {
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the user name for `uid`, resolving and caching it on first use.
    pub fn user(&mut self, uid: u32) -> String {
        self.users
            .entry(uid)
            .or_insert_with(|| {
                lookup_user(uid)
                    .or_else(|| getent("passwd", uid))
                    .unwrap_or_else(|| {
                        debug!("cannot resolve UID {}", uid);
                        uid.to_string()
                    })
            })
            .clone()
    }

    /// Returns the group name for `gid`, resolving and caching it on first use.
    pub fn group(&mut self, gid: u32) -> String {
        self.groups
            .entry(gid)
            .or_insert_with(|| {
                lookup_group(gid)
                    .or_else(|| getent("group", gid))
                    .unwrap_or_else(|| {
                        debug!("cannot resolve GID {}", gid);
                        gid.to_string()
                    })
            })
            .clone()
    }
}

fn lookup_user(uid: u32) -> Option<String> {
    let mut pwd = MaybeUninit::<passwd>::uninit();
    let mut buf = [0u8; LOOKUP_BUF_LEN];
    let mut result: *mut passwd = std::ptr::null_mut();

    let ret = unsafe {
        getpwuid_r(
            uid,
            pwd.as_mut_ptr(),
            buf.as_mut_ptr() as *mut c_char,
            buf.len(),
            &mut result,
        )
    };
    if ret != 0 || result.is_null() {
        return None;
    }

    // result points into pwd/buf, both alive for this scope
    unsafe {
        let name = (*result).pw_name;
        if name.is_null() {
            return None;
        }
        CStr::from_ptr(name).to_str().ok().map(String::from)
    }
}

fn lookup_group(gid: u32) -> Option<String> {
    let mut grp = MaybeUninit::<group>::uninit();
    let mut buf = [0u8; LOOKUP_BUF_LEN];
    let mut result: *mut group = std::ptr::null_mut();

    let ret = unsafe {
        getgrgid_r(
            gid,
            grp.as_mut_ptr(),
            buf.as_mut_ptr() as *mut c_char,
            buf.len(),
            &mut result,
        )
    };
    if ret != 0 || result.is_null() {
        return None;
    }

    unsafe {
        let name = (*result).gr_name;
        if name.is_null() {
            return None;
        }
        CStr::from_ptr(name).to_str().ok().map(String::from)
    }
}

/// Resolves an id through `getent <database> <id>`, taking the first field
/// of the returned record.
fn getent(database: &str, id: u32) -> Option<String> {
    let output = Command::new("getent")
        .arg(database)
        .arg(id.to_string())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let line = String::from_utf8(output.stdout).ok()?;
    line.trim()
        .split(':')
        .next()
        .filter(|name| !name.is_empty())
        .map(String::from)
}
