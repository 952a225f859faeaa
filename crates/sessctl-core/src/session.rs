use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::Instant,
};

/// Snapshot of the session's progress counters.
///
/// The live values are relaxed atomics on [`SessionHandle`]: one writer (the
/// worker) and one reader (the report handler), so a snapshot is an instant
/// of a progress display, not a correctness-critical value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    pub liked: u64,
    pub already_liked: u64,
    pub commented: u64,
    pub followed: u64,
    pub already_followed: u64,
    pub unfollowed: u64,
    pub liked_comments: u64,
    pub replied_comments: u64,
    pub inappropriate: u64,
    pub invalid_users: u64,
    pub stories_watched: u64,
    pub reels_watched: u64,
}

impl Counters {
    /// True when nothing has been recorded yet, across all twelve counters.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One named counter on the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Liked,
    AlreadyLiked,
    Commented,
    Followed,
    AlreadyFollowed,
    Unfollowed,
    LikedComments,
    RepliedComments,
    Inappropriate,
    InvalidUsers,
    StoriesWatched,
    ReelsWatched,
}

/// Shared handle to the worker's run state.
///
/// The worker owns an `Arc<SessionHandle>` and increments counters as it
/// progresses; the bot reads snapshots and may request an abort. The abort
/// flag is a cooperative signal: set once by the stop handler, polled by the
/// worker at its own loop checkpoints, never reset here.
#[derive(Debug)]
pub struct SessionHandle {
    liked: AtomicU64,
    already_liked: AtomicU64,
    commented: AtomicU64,
    followed: AtomicU64,
    already_followed: AtomicU64,
    unfollowed: AtomicU64,
    liked_comments: AtomicU64,
    replied_comments: AtomicU64,
    inappropriate: AtomicU64,
    invalid_users: AtomicU64,
    stories_watched: AtomicU64,
    reels_watched: AtomicU64,
    started: Instant,
    aborting: AtomicBool,
    log_folder: PathBuf,
}

impl SessionHandle {
    pub fn new(log_folder: impl Into<PathBuf>) -> Self {
        Self {
            liked: AtomicU64::new(0),
            already_liked: AtomicU64::new(0),
            commented: AtomicU64::new(0),
            followed: AtomicU64::new(0),
            already_followed: AtomicU64::new(0),
            unfollowed: AtomicU64::new(0),
            liked_comments: AtomicU64::new(0),
            replied_comments: AtomicU64::new(0),
            inappropriate: AtomicU64::new(0),
            invalid_users: AtomicU64::new(0),
            stories_watched: AtomicU64::new(0),
            reels_watched: AtomicU64::new(0),
            started: Instant::now(),
            aborting: AtomicBool::new(false),
            log_folder: log_folder.into(),
        }
    }

    fn cell(&self, metric: Metric) -> &AtomicU64 {
        match metric {
            Metric::Liked => &self.liked,
            Metric::AlreadyLiked => &self.already_liked,
            Metric::Commented => &self.commented,
            Metric::Followed => &self.followed,
            Metric::AlreadyFollowed => &self.already_followed,
            Metric::Unfollowed => &self.unfollowed,
            Metric::LikedComments => &self.liked_comments,
            Metric::RepliedComments => &self.replied_comments,
            Metric::Inappropriate => &self.inappropriate,
            Metric::InvalidUsers => &self.invalid_users,
            Metric::StoriesWatched => &self.stories_watched,
            Metric::ReelsWatched => &self.reels_watched,
        }
    }

    /// Worker-side increment of one counter.
    pub fn record(&self, metric: Metric) {
        self.cell(metric).fetch_add(1, Ordering::Relaxed);
    }

    /// Read-only snapshot for the report handler.
    pub fn counters(&self) -> Counters {
        Counters {
            liked: self.liked.load(Ordering::Relaxed),
            already_liked: self.already_liked.load(Ordering::Relaxed),
            commented: self.commented.load(Ordering::Relaxed),
            followed: self.followed.load(Ordering::Relaxed),
            already_followed: self.already_followed.load(Ordering::Relaxed),
            unfollowed: self.unfollowed.load(Ordering::Relaxed),
            liked_comments: self.liked_comments.load(Ordering::Relaxed),
            replied_comments: self.replied_comments.load(Ordering::Relaxed),
            inappropriate: self.inappropriate.load(Ordering::Relaxed),
            invalid_users: self.invalid_users.load(Ordering::Relaxed),
            stories_watched: self.stories_watched.load(Ordering::Relaxed),
            reels_watched: self.reels_watched.load(Ordering::Relaxed),
        }
    }

    /// Elapsed run time in whole seconds. Monotonically increasing.
    pub fn run_time(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    pub fn request_abort(&self) {
        self.aborting.store(true, Ordering::Relaxed);
    }

    pub fn abort_requested(&self) -> bool {
        self.aborting.load(Ordering::Relaxed)
    }

    /// Storage location for state that must survive restarts.
    pub fn log_folder(&self) -> &Path {
        &self.log_folder
    }
}
