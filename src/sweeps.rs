use crate::types::Task;

// Disk generation sweep bounds. Strategies 2-6 pack RGB histograms, 7-11 pack
// HSL; the name records the resulting dimensionality (three channels each).
const DISK_SIZE_MIN: u32 = 200;
const DISK_SIZE_MAX: u32 = 5200;
const DISK_SIZE_STEP: usize = 200;
const RGB_STRATEGIES: [u32; 5] = [2, 3, 4, 5, 6];
const HSL_STRATEGIES: [u32; 5] = [7, 8, 9, 10, 11];
const DISK_MIN_ENTRY: u32 = 12;
const DISK_MAX_ENTRY: u32 = 30;

const ACCU_STRATEGIES: [u32; 4] = [1, 3, 8, 12];
const TOP_K_VALUES: [u32; 5] = [2, 4, 6, 8, 10];

const MEASURE_STRATEGY_MAX: u32 = 11;
const MEASURE_TOP_K: u32 = 8;

const SPLIT_TREE_SIZE: u32 = 5613;
const SPLIT_STRATEGY: u32 = 1;
const SPLIT_MAX_ENTRY_MIN: u32 = 4;
const SPLIT_MAX_ENTRY_MAX: u32 = 48;

/// Disk generation sweep: every size against every RGB packing strategy, then
/// every HSL one. 260 tasks.
pub fn disk_generation_tasks() -> Vec<Task> {
    let mut tasks = Vec::new();
    for (space, strategies) in [("rgb", RGB_STRATEGIES), ("hsl", HSL_STRATEGIES)] {
        for size in (DISK_SIZE_MIN..=DISK_SIZE_MAX).step_by(DISK_SIZE_STEP) {
            for strategy in strategies {
                tasks.push(Task::new(
                    format!("disk_{}_{}_dim{}", space, size, strategy * 3),
                    format!("gnda {} {} {} {}", size, strategy, DISK_MIN_ENTRY, DISK_MAX_ENTRY),
                ));
            }
        }
    }
    tasks
}

/// Feature-accuracy sweep over strategy x top-k. 20 tasks.
pub fn feature_accuracy_tasks() -> Vec<Task> {
    let mut tasks = Vec::new();
    for strategy in ACCU_STRATEGIES {
        for top_k in TOP_K_VALUES {
            tasks.push(Task::new(
                format!("feature_accu_{}_strategy{}", top_k, strategy),
                format!("accu {} {}", strategy, top_k),
            ));
        }
    }
    tasks
}

/// Combined accuracy/recall measurement: one `accu` and one `recl` task per
/// strategy, top-k fixed at 8. 22 tasks.
pub fn measurement_tasks() -> Vec<Task> {
    let mut tasks = Vec::new();
    for strategy in 1..=MEASURE_STRATEGY_MAX {
        tasks.push(Task::new(
            format!("measure_accu_strategy{}", strategy),
            format!("accu {} {}", strategy, MEASURE_TOP_K),
        ));
        tasks.push(Task::new(
            format!("measure_recl_strategy{}", strategy),
            format!("recl {}", strategy),
        ));
    }
    tasks
}

/// Split-count benchmark sweep: for each even max entry bound, every min bound
/// from max/3 through max/2 (integer division). 130 tasks.
pub fn splitcount_tasks() -> Vec<Task> {
    let mut tasks = Vec::new();
    for max_entry in (SPLIT_MAX_ENTRY_MIN..=SPLIT_MAX_ENTRY_MAX).step_by(2) {
        for min_entry in max_entry / 3..=max_entry / 2 {
            tasks.push(Task::new(
                format!("splitcount_{}_{}", min_entry, max_entry),
                format!(
                    "gscb {} {} {} {}",
                    SPLIT_TREE_SIZE, SPLIT_STRATEGY, min_entry, max_entry
                ),
            ));
        }
    }
    tasks
}

/// The full ordered task list: disk generation, feature accuracy, measurement,
/// split count. Deterministic; names are globally unique.
pub fn all_tasks() -> Vec<Task> {
    let mut tasks = disk_generation_tasks();
    tasks.extend(feature_accuracy_tasks());
    tasks.extend(measurement_tasks());
    tasks.extend(splitcount_tasks());
    tasks
}
