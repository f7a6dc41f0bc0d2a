//! 点阵屏图案（16 列 × 8 行，每字节一列）

/// 16 字节位图
pub type Pattern = [u8; 16];

/// 全亮（大灯）
pub const FULL: Pattern = [0xFF; 16];

/// 警示图案（障碍物）
pub const WARNING: Pattern = [
    0x00, 0x00, 0x5E, 0x5E, 0x00, 0x00, 0x00, 0x5E, 0x5E, 0x00, 0x00, 0x00, 0x5E, 0x5E, 0x00, 0x00,
];

/// 启动画面
pub const LOGO: Pattern = [
    0x00, 0x7E, 0x12, 0x12, 0x0C, 0x00, 0x3C, 0x42, 0x52, 0x34, 0x00, 0x7E, 0x12, 0x12, 0x0C, 0x00,
];
