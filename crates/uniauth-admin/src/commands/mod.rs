/*!
 * Command implementations
 */

pub mod accounts;
pub mod roles;
