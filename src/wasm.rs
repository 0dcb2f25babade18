#![cfg(target_arch = "wasm32")]

use crate::behaviors::{
    AlignmentParams, ArrivalParams, AvoidanceParams, CohesionParams, LeaderParams, SeparationParams,
    SteeringGains, WanderParams,
};
use crate::engine::{preset_catalog, AgentConfig, Engine, PresetInfo, PRESET_SEEK};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn available_presets() -> js_sys::Array {
    let out = js_sys::Array::new();
    for info in preset_catalog() {
        out.push(&preset_info_to_js(info));
    }
    out
}

#[wasm_bindgen]
pub fn gains_defaults() -> JsValue {
    serde_wasm_bindgen::to_value(&SteeringGains::default()).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn wander_defaults() -> JsValue {
    serde_wasm_bindgen::to_value(&WanderParams::default()).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn separation_defaults() -> JsValue {
    serde_wasm_bindgen::to_value(&SeparationParams::default()).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn cohesion_defaults() -> JsValue {
    serde_wasm_bindgen::to_value(&CohesionParams::default()).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn alignment_defaults() -> JsValue {
    serde_wasm_bindgen::to_value(&AlignmentParams::default()).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn avoidance_defaults() -> JsValue {
    serde_wasm_bindgen::to_value(&AvoidanceParams::default()).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn arrival_defaults() -> JsValue {
    serde_wasm_bindgen::to_value(&ArrivalParams::default()).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn leader_defaults() -> JsValue {
    serde_wasm_bindgen::to_value(&LeaderParams::default()).unwrap_or(JsValue::NULL)
}

fn preset_info_to_js(info: &PresetInfo) -> JsValue {
    let obj = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&obj, &JsValue::from_str("id"), &JsValue::from_str(info.id));
    let _ = js_sys::Reflect::set(&obj, &JsValue::from_str("name"), &JsValue::from_str(info.name));
    let _ = js_sys::Reflect::set(
        &obj,
        &JsValue::from_str("description"),
        &JsValue::from_str(info.description),
    );
    JsValue::from(obj)
}

#[wasm_bindgen]
pub struct WasmSim {
    engine: Engine,
}

#[wasm_bindgen]
impl WasmSim {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, count: usize, seed: u64) -> WasmSim {
        WasmSim {
            engine: Engine::new_demo(width, height, count, seed),
        }
    }

    pub fn new_demo() -> Result<WasmSim, JsValue> {
        let mut engine = Engine::new_demo(1280.0, 720.0, 100, 7);
        engine
            .set_preset(PRESET_SEEK)
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(WasmSim { engine })
    }

    /// Build a custom scene from
    /// `[{ position: [x, y], velocity?: [vx, vy], maxSpeed?, speedMultiplier? }]`.
    #[wasm_bindgen(js_name = "newFromConfig")]
    pub fn new_from_config(
        configs: JsValue,
        width: f32,
        height: f32,
        seed: u64,
        preset: Option<String>,
    ) -> Result<WasmSim, JsValue> {
        let configs: Vec<AgentConfig> = serde_wasm_bindgen::from_value(configs)
            .map_err(|e| JsValue::from_str(&format!("invalid agent configs: {e}")))?;
        let engine = Engine::new_custom(&configs, width, height, seed, preset.as_deref())
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(WasmSim { engine })
    }

    pub fn len(&self) -> usize {
        self.engine.len()
    }

    pub fn tick(&mut self, dt: f32) {
        self.engine.tick(dt);
    }

    pub fn set_preset(&mut self, id: &str) -> Result<(), JsValue> {
        self.engine.set_preset(id).map_err(|e| JsValue::from_str(&e))
    }

    pub fn set_target(&mut self, x: f32, y: f32) {
        self.engine.set_target(x, y);
    }

    pub fn add_obstacle(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.engine.add_obstacle(x, y, width, height);
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.engine.set_speed_multiplier(multiplier);
    }

    pub fn set_gains(&mut self, behavior: &str, gains: JsValue) -> Result<(), JsValue> {
        let gains: SteeringGains = serde_wasm_bindgen::from_value(gains)
            .map_err(|e| JsValue::from_str(&format!("invalid gains: {e}")))?;
        self.engine
            .set_gains(behavior, gains)
            .map_err(|e| JsValue::from_str(&e))
    }

    pub fn set_wander_params(&mut self, params: JsValue) -> Result<(), JsValue> {
        let params: WanderParams = serde_wasm_bindgen::from_value(params)
            .map_err(|e| JsValue::from_str(&format!("invalid wander params: {e}")))?;
        self.engine.set_wander_params(params);
        Ok(())
    }

    pub fn set_separation_params(&mut self, params: JsValue) -> Result<(), JsValue> {
        let params: SeparationParams = serde_wasm_bindgen::from_value(params)
            .map_err(|e| JsValue::from_str(&format!("invalid separation params: {e}")))?;
        self.engine.set_separation_params(params);
        Ok(())
    }

    pub fn set_cohesion_params(&mut self, params: JsValue) -> Result<(), JsValue> {
        let params: CohesionParams = serde_wasm_bindgen::from_value(params)
            .map_err(|e| JsValue::from_str(&format!("invalid cohesion params: {e}")))?;
        self.engine.set_cohesion_params(params);
        Ok(())
    }

    pub fn set_alignment_params(&mut self, params: JsValue) -> Result<(), JsValue> {
        let params: AlignmentParams = serde_wasm_bindgen::from_value(params)
            .map_err(|e| JsValue::from_str(&format!("invalid alignment params: {e}")))?;
        self.engine.set_alignment_params(params);
        Ok(())
    }

    pub fn set_avoidance_params(&mut self, params: JsValue) -> Result<(), JsValue> {
        let params: AvoidanceParams = serde_wasm_bindgen::from_value(params)
            .map_err(|e| JsValue::from_str(&format!("invalid avoidance params: {e}")))?;
        self.engine.set_avoidance_params(params);
        Ok(())
    }

    pub fn set_arrival_params(&mut self, params: JsValue) -> Result<(), JsValue> {
        let params: ArrivalParams = serde_wasm_bindgen::from_value(params)
            .map_err(|e| JsValue::from_str(&format!("invalid arrival params: {e}")))?;
        self.engine.set_arrival_params(params);
        Ok(())
    }

    pub fn set_leader_params(&mut self, params: JsValue) -> Result<(), JsValue> {
        let params: LeaderParams = serde_wasm_bindgen::from_value(params)
            .map_err(|e| JsValue::from_str(&format!("invalid leader params: {e}")))?;
        self.engine.set_leader_params(params);
        Ok(())
    }

    pub fn positions(&self) -> Vec<f32> {
        self.engine.positions_flat()
    }

    pub fn velocities(&self) -> Vec<f32> {
        self.engine.velocities_flat()
    }

    pub fn orientations(&self) -> Vec<f32> {
        self.engine.orientations_flat()
    }

    pub fn colors(&self) -> Vec<f32> {
        self.engine.colors_flat()
    }

    pub fn states(&self) -> Vec<f32> {
        self.engine.states_flat()
    }

    /// Highlight events since the last call, as `[source, target]*` pairs.
    pub fn events(&mut self) -> Vec<u32> {
        self.engine.events_flat()
    }

    pub fn preset(&self) -> String {
        self.engine.preset_id().to_string()
    }
}
