//! # 效果参数模型
//!
//! Audacity 内置效果（Normalize、Compressor）和导出预设的参数，
//! 默认值与原批处理脚本一致，可通过配置文件覆盖。
//!
//! ## 依赖关系
//! - 被 `config.rs` 和 `batch/pipeline.rs` 使用
//! - 使用 `remote/command.rs` 生成命令

use crate::remote::RemoteCommand;
use serde::{Deserialize, Serialize};

/// Normalize 效果参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct NormalizeSettings {
    /// 是否施加增益
    pub apply_gain: bool,
    /// 目标峰值 (dB)
    pub peak_level: f64,
    /// 去除直流偏移
    pub remove_dc_offset: bool,
    /// 各声道独立归一化
    pub stereo_independent: bool,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            apply_gain: true,
            peak_level: -1.0,
            remove_dc_offset: true,
            stereo_independent: false,
        }
    }
}

impl NormalizeSettings {
    pub fn to_command(&self) -> RemoteCommand {
        RemoteCommand::new("Normalize")
            .param("ApplyGain", self.apply_gain)
            .param("PeakLevel", self.peak_level)
            .param("RemoveDcOffset", self.remove_dc_offset)
            .param("StereoIndependent", self.stereo_independent)
    }
}

/// Compressor 效果参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CompressorSettings {
    /// 起音时间 (s)
    pub attack_time: f64,
    /// 噪声底 (dB)
    pub noise_floor: f64,
    /// 压缩后归一化到 0 dB
    pub normalize: bool,
    pub ratio: f64,
    /// 释放时间 (s)
    pub release_time: f64,
    /// 阈值 (dB)
    pub threshold: f64,
    /// 基于峰值而非 RMS
    pub use_peak: bool,
}

impl Default for CompressorSettings {
    fn default() -> Self {
        Self {
            attack_time: 0.1,
            noise_floor: -60.0,
            normalize: true,
            ratio: 3.0,
            release_time: 1.0,
            threshold: -20.0,
            use_peak: false,
        }
    }
}

impl CompressorSettings {
    pub fn to_command(&self) -> RemoteCommand {
        RemoteCommand::new("Compressor")
            .param("AttackTime", self.attack_time)
            .param("NoiseFloor", self.noise_floor)
            .param("Normalize", self.normalize)
            .param("Ratio", self.ratio)
            .param("ReleaseTime", self.release_time)
            .param("Threshold", self.threshold)
            .param("UsePeak", self.use_peak)
    }
}

/// 导出设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// 宏输出目录预设名
    pub preset: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            preset: "<Factory Defaults>".to_string(),
        }
    }
}

impl ExportSettings {
    pub fn preset_command(&self) -> RemoteCommand {
        RemoteCommand::new("LegacyMacroOutputFolder").param("Use_Preset", self.preset.as_str())
    }
}

/// 导出格式，按导出顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Wav,
    Mp3,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Wav, ExportFormat::Mp3];

    pub fn to_command(self) -> RemoteCommand {
        match self {
            ExportFormat::Wav => RemoteCommand::new("ExportWav"),
            ExportFormat::Mp3 => RemoteCommand::new("ExportMp3"),
        }
    }
}

/// 全部效果设置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    pub normalize: NormalizeSettings,
    pub compressor: CompressorSettings,
    pub export: ExportSettings,
}
