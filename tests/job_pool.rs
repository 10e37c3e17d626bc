use animdag::dag::{EvaluateClipAnimatorJob, JobPool};
use animdag::resources::Handle;

#[test]
fn new_pool_is_empty() {
    let pool: JobPool<EvaluateClipAnimatorJob> = JobPool::new();
    assert_eq!(pool.allocated(), 0);
    assert!(pool.get(0).is_none());
}

#[test]
fn ensure_capacity_reports_how_many_jobs_were_added() {
    let mut pool: JobPool<EvaluateClipAnimatorJob> = JobPool::new();

    assert_eq!(pool.ensure_capacity(3), 3);
    assert_eq!(pool.ensure_capacity(2), 0);
    assert_eq!(pool.ensure_capacity(3), 0);
    assert_eq!(pool.ensure_capacity(5), 2);
    assert_eq!(pool.allocated(), 5);
}

#[test]
fn shrinking_request_keeps_every_job() {
    let mut pool: JobPool<EvaluateClipAnimatorJob> = JobPool::new();
    pool.ensure_capacity(4);

    pool.ensure_capacity(0);

    assert_eq!(pool.allocated(), 4);
    assert_eq!(pool.iter().count(), 4);
}

#[test]
fn growth_keeps_existing_jobs_in_place() {
    let mut pool: JobPool<EvaluateClipAnimatorJob> = JobPool::new();
    pool.ensure_capacity(1);
    let before = pool.get(0).map(|job| job.animator());

    pool.ensure_capacity(64);

    assert_eq!(pool.get(0).map(|job| job.animator()), before);
    assert!(pool.iter().all(|job| job.animator() == Handle::null()));
    assert!(pool.get_mut(63).is_some());
    assert!(pool.get(64).is_none());
}
