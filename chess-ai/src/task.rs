//! 后台搜索任务
//!
//! 在独立线程运行 AI 计算，不阻塞调用方。搜索内部没有取消点：
//! 想取消时直接丢弃任务，线程会跑完当前搜索然后结果被丢弃。

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chess_core::{Board, Color, Move};
use tracing::error;

use crate::search::AiEngine;

/// AI 计算任务
pub struct SearchTask {
    /// 工作线程
    handle: JoinHandle<Option<Move>>,
    /// 开始时间
    started_at: Instant,
}

impl SearchTask {
    /// 启动后台搜索（棋盘按值移入工作线程）
    pub fn spawn(mut engine: AiEngine, board: Board, color: Color) -> Self {
        let handle = thread::spawn(move || engine.search(&board, color));
        Self {
            handle,
            started_at: Instant::now(),
        }
    }

    /// 搜索是否已完成
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// 已思考的时间
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// 等待搜索结束并取回走法
    pub fn join(self) -> Option<Move> {
        match self.handle.join() {
            Ok(result) => result,
            Err(_) => {
                error!("search thread panicked");
                None
            }
        }
    }
}
