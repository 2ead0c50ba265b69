use clap::Parser;

/// 多账号挂机启动器
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// 要执行的动作 (1: 启动挂机, 2: 注册会话)，缺省时进入交互选择
    #[arg(short, long)]
    pub action: Option<String>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<String>,
}
