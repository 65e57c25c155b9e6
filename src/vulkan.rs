//! Vulkan fallback path
//!
//! When no OpenGL context can be created, the window manager falls back to
//! creating a Vulkan instance and window surface. This stops at "context
//! ready": no device or swapchain is set up in this skeleton.

use ash::vk;
use std::ffi::CString;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VulkanError {
    #[error("could not load Vulkan library: {0}")]
    LoadingFailed(String),

    #[error("no Vulkan instance extensions found, need at least VK_KHR_surface")]
    NoSurfaceExtensions,

    #[error("invalid extension or application name")]
    InvalidName,

    #[error("could not create Vulkan instance: {0}")]
    InstanceCreation(vk::Result),

    #[error("could not enumerate physical devices: {0}")]
    EnumerationFailed(vk::Result),

    #[error("no Vulkan capable GPU found")]
    NoPhysicalDevice,

    #[error("could not create window surface: {0}")]
    SurfaceCreation(vk::Result),
}

/// Owns the fallback instance and surface; destroyed explicitly on shutdown.
pub struct VulkanFallback {
    // entry keeps the loaded library alive for the instance
    #[allow(dead_code)]
    entry: ash::Entry,
    instance: ash::Instance,
    surface_loader: ash::extensions::khr::Surface,
    surface: vk::SurfaceKHR,
    destroyed: bool,
}

impl VulkanFallback {
    /// Create an instance with the surface extensions GLFW requires and a
    /// window surface for `window`.
    pub fn new(
        glfw: &glfw::Glfw,
        window: &mut glfw::PWindow,
        app_name: &str,
    ) -> Result<Self, VulkanError> {
        let entry = unsafe { ash::Entry::load() }
            .map_err(|e| VulkanError::LoadingFailed(format!("{e:?}")))?;

        let app_name_c = CString::new(app_name).map_err(|_| VulkanError::InvalidName)?;
        let engine_name_c = CString::new("crater").map_err(|_| VulkanError::InvalidName)?;
        let app_info = vk::ApplicationInfo::builder()
            .application_name(&app_name_c)
            .application_version(vk::make_api_version(0, 0, 0, 1))
            .engine_name(&engine_name_c)
            .engine_version(vk::make_api_version(0, 1, 0, 0))
            .api_version(vk::API_VERSION_1_3);

        let required_extensions = glfw
            .get_required_instance_extensions()
            .ok_or(VulkanError::NoSurfaceExtensions)?;
        if required_extensions.is_empty() {
            return Err(VulkanError::NoSurfaceExtensions);
        }
        log::info!("found {} Vulkan extension(s)", required_extensions.len());
        for extension in &required_extensions {
            log::info!("  {}", extension);
        }

        let extension_names: Vec<CString> = required_extensions
            .iter()
            .map(|ext| CString::new(ext.as_str()).map_err(|_| VulkanError::InvalidName))
            .collect::<Result<_, _>>()?;
        let extension_ptrs: Vec<*const i8> =
            extension_names.iter().map(|ext| ext.as_ptr()).collect();

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_extension_names(&extension_ptrs);

        let instance = unsafe {
            entry
                .create_instance(&create_info, None)
                .map_err(VulkanError::InstanceCreation)?
        };

        let physical_devices = match unsafe { instance.enumerate_physical_devices() } {
            Ok(devices) => devices,
            Err(e) => {
                unsafe { instance.destroy_instance(None) };
                return Err(VulkanError::EnumerationFailed(e));
            }
        };
        if physical_devices.is_empty() {
            unsafe { instance.destroy_instance(None) };
            return Err(VulkanError::NoPhysicalDevice);
        }
        log::info!("found {} physical device(s)", physical_devices.len());

        let mut surface = vk::SurfaceKHR::null();
        let result = window.create_window_surface(instance.handle(), std::ptr::null(), &mut surface);
        if result != vk::Result::SUCCESS {
            unsafe { instance.destroy_instance(None) };
            return Err(VulkanError::SurfaceCreation(result));
        }

        let surface_loader = ash::extensions::khr::Surface::new(&entry, &instance);
        log::info!("Vulkan instance and surface ready");

        Ok(Self {
            entry,
            instance,
            surface_loader,
            surface,
            destroyed: false,
        })
    }

    /// Destroy surface and instance. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        unsafe {
            self.surface_loader.destroy_surface(self.surface, None);
            self.instance.destroy_instance(None);
        }
        self.destroyed = true;
    }
}
