/// Router Module Index
///
/// Routes are grouped by access level. The admin router is wrapped in the
/// authentication `route_layer` by `create_router`, so a handler's exposure is
/// decided by which of these modules mounts it. Public reads and admin writes
/// may share a path; the two routers are merged method by method.

/// Anonymous routes: public page reads, visit tracking, login/logout.
pub mod public;

/// Routes that require an admin session.
pub mod admin;
