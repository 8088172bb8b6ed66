// Bulletin Admin - Rust client core for the Bulletin Board administration panel
// Copyright (C) 2025 Bulletin Board Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Slot layouts for the detail views and delete confirmations

use crate::models::{Post, User};

use super::{slots, Page};

/// Placeholder shown when a user has no profile image
pub const PROFILE_PLACEHOLDER: &str = "<p class='glyphicon glyphicon-user profile-icon'></p>";

/// Markup for the profile slot
pub fn profile_markup(profile: Option<&str>) -> String {
    match profile.filter(|p| !p.is_empty()) {
        Some(path) => format!(
            "<img src='/static/{}' alt='user profile' class='profile-img'>",
            path
        ),
        None => PROFILE_PLACEHOLDER.to_string(),
    }
}

pub fn post_detail<P: Page + ?Sized>(page: &mut P, post: &Post) {
    page.set_html(slots::TITLE, &post.title);
    page.set_html(slots::DESCRIPTION, &post.description);
    page.set_html(slots::STATUS, post.status.label());
    page.set_html(slots::CREATED_DATE, &post.created_at);
    page.set_html(slots::CREATED_USER, &post.created_by);
    page.set_html(slots::UPDATED_DATE, &post.updated_at);
    page.set_html(slots::UPDATED_USER, &post.updated_by);
}

pub fn user_detail<P: Page + ?Sized>(page: &mut P, user: &User) {
    page.set_html(slots::USER_PROFILE, &profile_markup(user.profile.as_deref()));
    page.set_html(slots::USER_NAME, &user.name);
    page.set_html(slots::USER_TYPE, user.user_type.label());
    page.set_html(slots::USER_EMAIL, &user.email);
    page.set_html(slots::USER_PHONE, &user.phone);
    page.set_html(slots::USER_DOB, &user.dob);
    page.set_html(slots::USER_ADDRESS, &user.address);
    page.set_html(slots::CREATED_DATE, &user.created_at);
    page.set_html(slots::CREATED_USER, &user.created_by);
    page.set_html(slots::UPDATED_DATE, &user.updated_at);
    page.set_html(slots::UPDATED_USER, &user.updated_by);
}

/// Fill the post delete dialog. `id` is shown exactly as it was requested.
pub fn post_delete_confirm<P: Page + ?Sized>(page: &mut P, id: &str, post: &Post) {
    page.set_html(slots::POST_DELETE_ID, id);
    page.set_html(slots::POST_DELETE_TITLE, &post.title);
    page.set_html(slots::POST_DELETE_DESCRIPTION, &post.description);
    page.set_html(slots::POST_DELETE_STATUS, post.status.label());
}

/// Fill the user delete dialog. `id` is shown exactly as it was requested.
pub fn user_delete_confirm<P: Page + ?Sized>(page: &mut P, id: &str, user: &User) {
    page.set_html(slots::USER_DELETE_ID, id);
    page.set_html(slots::USER_DELETE_NAME, &user.name);
    page.set_html(slots::USER_DELETE_TYPE, user.user_type.label());
    page.set_html(slots::USER_DELETE_EMAIL, &user.email);
    page.set_html(slots::USER_DELETE_PHONE, &user.phone);
    page.set_html(slots::USER_DELETE_DOB, &user.dob);
    page.set_html(slots::USER_DELETE_ADDRESS, &user.address);
}
