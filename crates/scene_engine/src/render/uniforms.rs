//! Structured light uniform upload
//!
//! All light parameters reach the shading program through these functions,
//! so indexed uniform names are formatted in exactly one place. The names
//! match the shader interface verbatim (`dirLight.*`, `pointLights[i].*`,
//! `spotLight[i].*`).

use crate::render::api::RenderDevice;
use crate::render::lighting::{DirectionalLight, LightMask, PointLight, SpotLight};

/// Upload the light-presence flags for the bound program
pub fn set_light_mask(device: &mut dyn RenderDevice, mask: LightMask) {
    device.set_int("hasDirLight", i32::from(mask.contains(LightMask::DIRECTIONAL)));
    device.set_int("hasPointLight", i32::from(mask.contains(LightMask::POINT)));
    device.set_int("hasSpotLight", i32::from(mask.contains(LightMask::SPOT)));
}

/// Upload the directional light block
pub fn set_directional_light(device: &mut dyn RenderDevice, light: &DirectionalLight) {
    device.set_vec3("dirLight.direction", light.direction);
    device.set_vec3("dirLight.ambient", light.ambient);
    device.set_vec3("dirLight.diffuse", light.diffuse);
    device.set_vec3("dirLight.specular", light.specular);
}

/// Upload a point light into an indexed slot
pub fn set_point_light(device: &mut dyn RenderDevice, slot: usize, light: &PointLight) {
    let name = |field: &str| format!("pointLights[{slot}].{field}");
    device.set_vec3(&name("position"), light.position);
    device.set_vec3(&name("ambient"), light.ambient);
    device.set_vec3(&name("diffuse"), light.diffuse);
    device.set_vec3(&name("specular"), light.specular);
    device.set_float(&name("constant"), light.constant);
    device.set_float(&name("linear"), light.linear);
    device.set_float(&name("quadratic"), light.quadratic);
}

/// Upload a spotlight into an indexed slot
///
/// The caller is expected to have aimed the light first; position and
/// direction are read as-is.
pub fn set_spot_light(device: &mut dyn RenderDevice, slot: usize, light: &SpotLight) {
    let name = |field: &str| format!("spotLight[{slot}].{field}");
    device.set_vec3(&name("position"), light.position);
    device.set_vec3(&name("direction"), light.direction);
    device.set_vec3(&name("ambient"), light.ambient);
    device.set_vec3(&name("diffuse"), light.diffuse);
    device.set_vec3(&name("specular"), light.specular);
    device.set_float(&name("constant"), light.constant);
    device.set_float(&name("linear"), light.linear);
    device.set_float(&name("quadratic"), light.quadratic);
    device.set_float(&name("cutOff"), light.cut_off);
    device.set_float(&name("outerCutOff"), light.outer_cut_off);
}
