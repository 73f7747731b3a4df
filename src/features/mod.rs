/// 报表查询核心：区间/地域/分组归一化、查询构建、响应整形
pub mod reports;

/// 视频门面：指标方法与广告选项
pub mod video;

/// 账号门面：频道/用户信息/视频列表/上传
pub mod account;
