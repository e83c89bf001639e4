//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`StoragePort`]: the configuration record lives as a single
//! fixed-size blob under the `netdaq` namespace. ESP-IDF NVS commits are
//! atomic per `nvs_commit()`, which satisfies the port's atomicity
//! requirement natively; the simulation backend achieves it trivially.

use crate::app::ports::{StorageError, StoragePort};
use crate::config::CONFIG_BLOB_LEN;
use log::info;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::warn;

const CONFIG_NAMESPACE: &str = "netdaq";

pub struct NvsAdapter {
    #[cfg(not(target_os = "espidf"))]
    block: std::cell::RefCell<Option<[u8; CONFIG_BLOB_LEN]>>,
}

impl NvsAdapter {
    /// Create the adapter and initialise NVS flash.
    ///
    /// Returns `Err(StorageError::IoError)` if flash initialisation fails
    /// unrecoverably. On first boot or after a version mismatch the NVS
    /// partition is erased and re-initialised automatically.
    pub fn new() -> Result<Self, StorageError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any concurrent NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                let ret2 = unsafe { nvs_flash_erase() };
                if ret2 != ESP_OK {
                    return Err(StorageError::IoError);
                }
                let ret3 = unsafe { nvs_flash_init() };
                if ret3 != ESP_OK {
                    return Err(StorageError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(StorageError::IoError);
            }
            info!("NvsAdapter: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsAdapter: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            block: std::cell::RefCell::new(None),
        })
    }

    /// Open an NVS namespace, execute a closure with the handle, then close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, i32>,
    {
        let mut ns_buf = [0u8; 16];
        let ns_bytes = CONFIG_NAMESPACE.as_bytes();
        ns_buf[..ns_bytes.len()].copy_from_slice(ns_bytes);

        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let ret = unsafe { nvs_open(ns_buf.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }

        let result = f(handle);
        unsafe {
            nvs_close(handle);
        }
        result
    }
}

impl StoragePort for NvsAdapter {
    fn read_block(&self, buf: &mut [u8; CONFIG_BLOB_LEN]) -> Result<(), StorageError> {
        #[cfg(not(target_os = "espidf"))]
        {
            match *self.block.borrow() {
                Some(b) => {
                    buf.copy_from_slice(&b);
                    Ok(())
                }
                None => Err(StorageError::NotFound),
            }
        }

        #[cfg(target_os = "espidf")]
        {
            let result = Self::with_nvs_handle(false, |handle| {
                let key_cstr = b"devcfg\0";
                let mut size = CONFIG_BLOB_LEN;
                let ret = unsafe {
                    nvs_get_blob(
                        handle,
                        key_cstr.as_ptr() as *const _,
                        buf.as_mut_ptr() as *mut _,
                        &mut size,
                    )
                };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(size)
            });
            match result {
                // A short blob from an older layout counts as uninitialized.
                Ok(size) if size == CONFIG_BLOB_LEN => Ok(()),
                Ok(_) => Err(StorageError::NotFound),
                Err(e) if e == ESP_ERR_NVS_NOT_FOUND => Err(StorageError::NotFound),
                Err(e) => {
                    warn!("NvsAdapter: NVS read error {}", e);
                    Err(StorageError::IoError)
                }
            }
        }
    }

    fn write_block(&mut self, data: &[u8; CONFIG_BLOB_LEN]) -> Result<(), StorageError> {
        #[cfg(not(target_os = "espidf"))]
        {
            *self.block.borrow_mut() = Some(*data);
            Ok(())
        }

        #[cfg(target_os = "espidf")]
        {
            let result = Self::with_nvs_handle(true, |handle| {
                let key_cstr = b"devcfg\0";
                let ret = unsafe {
                    nvs_set_blob(
                        handle,
                        key_cstr.as_ptr() as *const _,
                        data.as_ptr() as *const _,
                        data.len(),
                    )
                };
                if ret != ESP_OK {
                    return Err(ret);
                }
                let ret = unsafe { nvs_commit(handle) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(())
            });
            match result {
                Ok(()) => {
                    info!("NvsAdapter: config block written ({} bytes)", data.len());
                    Ok(())
                }
                Err(e) => {
                    warn!("NvsAdapter: NVS write error {}", e);
                    Err(StorageError::IoError)
                }
            }
        }
    }
}
