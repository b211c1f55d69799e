//! `tools/call` behaviour against a recording command runner.

mod common;

use std::path::Path;

use common::{Harness, NPM, RecordingRunner};
use npm_mcp_core::MockEnv;
use serde_json::json;

#[tokio::test]
async fn publish_runs_npm_with_scoped_credentials() {
    let h = Harness::with_token(RecordingRunner::succeeding("+ my-pkg@1.0.0\n"));

    let response = h.server.call_tool("npm_publish", Some(json!({}))).await;

    assert!(!response.is_error);
    assert_eq!(response.first_text(), Some("+ my-pkg@1.0.0"));

    let calls = h.runner.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    let userconfig = call.userconfig.clone().unwrap();
    assert_eq!(
        call.args,
        [
            "publish",
            "--tag",
            "latest",
            "--access",
            "public",
            "--userconfig",
            userconfig.to_str().unwrap(),
        ]
    );
    assert_eq!(call.working_dir, h.package.path());
    assert_eq!(
        call.userconfig_contents.as_deref(),
        Some("//registry.npmjs.org/:_authToken=npm_secret\n")
    );
    assert!(userconfig.starts_with(h.scratch.path()));
    assert!(!userconfig.exists());
    assert_eq!(h.scratch_entries(), 0);
}

#[tokio::test]
async fn publish_passes_tag_access_and_otp() {
    let h = Harness::with_token(RecordingRunner::succeeding("ok"));
    std::fs::create_dir(h.package.path().join("sub")).unwrap();

    let response = h
        .server
        .call_tool(
            "npm_publish",
            Some(json!({
                "packagePath": "sub",
                "tag": "next",
                "access": "restricted",
                "otp": "123456"
            })),
        )
        .await;

    assert!(!response.is_error);
    let call = &h.runner.calls()[0];
    assert_eq!(call.working_dir, h.package.path().join("sub"));
    assert_eq!(&call.args[..5], ["publish", "--tag", "next", "--access", "restricted"]);
    assert_eq!(&call.args[7..], ["--otp", "123456"]);
}

#[tokio::test]
async fn publish_without_token_never_runs_npm() {
    let h = Harness::new(RecordingRunner::succeeding("ok"), MockEnv::new());

    let response = h.server.call_tool("npm_publish", None).await;

    assert!(response.is_error);
    assert_eq!(
        response.first_text(),
        Some("npm token is not set. Provide NPM_ACCESS_TOKEN or NPM_TOKEN in server env.")
    );
    assert!(h.runner.calls().is_empty());
    assert_eq!(h.scratch_entries(), 0);
}

#[tokio::test]
async fn blank_access_token_falls_back_to_npm_token() {
    let env = MockEnv::new()
        .with_var("NPM_ACCESS_TOKEN", "   ")
        .with_var("NPM_TOKEN", " fallback ");
    let h = Harness::new(RecordingRunner::succeeding("ok"), env);

    h.server.call_tool("npm_publish", None).await;

    let call = &h.runner.calls()[0];
    assert_eq!(
        call.userconfig_contents.as_deref(),
        Some("//registry.npmjs.org/:_authToken=fallback\n")
    );
}

#[tokio::test]
async fn invalid_access_is_rejected_before_running() {
    let h = Harness::with_token(RecordingRunner::succeeding("ok"));

    let response = h
        .server
        .call_tool("npm_publish", Some(json!({ "access": "private" })))
        .await;

    assert!(response.is_error);
    assert!(response.first_text().unwrap().contains("public, restricted"));
    assert!(h.runner.calls().is_empty());
}

#[tokio::test]
async fn failed_publish_reports_npm_output_and_cleans_up() {
    let h = Harness::with_token(RecordingRunner::failing(
        "npm ERR! 403 Forbidden - PUT https://registry.npmjs.org/my-pkg\n",
        1,
    ));

    let response = h.server.call_tool("npm_publish", None).await;

    assert!(response.is_error);
    assert_eq!(
        response.first_text(),
        Some("npm ERR! 403 Forbidden - PUT https://registry.npmjs.org/my-pkg")
    );
    assert_eq!(h.scratch_entries(), 0);
}

#[tokio::test]
async fn unpublish_without_token_reports_missing_token() {
    let h = Harness::new(RecordingRunner::succeeding("ok"), MockEnv::new());

    for arguments in [json!({ "packageName": "my-pkg" }), json!({ "version": "1.0.0" })] {
        let response = h.server.call_tool("npm_unpublish", Some(arguments)).await;

        assert!(response.is_error);
        assert_eq!(
            response.first_text(),
            Some("npm token is not set. Provide NPM_ACCESS_TOKEN or NPM_TOKEN in server env.")
        );
    }
    assert!(h.runner.calls().is_empty());
    assert_eq!(h.scratch_entries(), 0);
}

#[tokio::test]
async fn unpublish_with_token_but_no_version_never_runs_npm() {
    let h = Harness::with_token(RecordingRunner::succeeding("ok"));

    let response = h
        .server
        .call_tool("npm_unpublish", Some(json!({ "packageName": "my-pkg", "version": "  " })))
        .await;

    assert!(response.is_error);
    assert_eq!(response.first_text(), Some("version is required for npm_unpublish."));
    assert!(h.runner.calls().is_empty());
    assert_eq!(h.scratch_entries(), 0);
}

#[tokio::test]
async fn unpublish_reads_name_from_descriptor() {
    let h = Harness::with_token(RecordingRunner::succeeding("- my-pkg@1.0.0"));
    h.write_descriptor(Path::new("pkg"), "my-pkg");

    let response = h
        .server
        .call_tool(
            "npm_unpublish",
            Some(json!({ "packagePath": "pkg", "version": "1.0.0", "otp": "654321" })),
        )
        .await;

    assert!(!response.is_error);
    let call = &h.runner.calls()[0];
    let userconfig = call.userconfig.clone().unwrap();
    assert_eq!(
        call.args,
        [
            "unpublish",
            "my-pkg@1.0.0",
            "--userconfig",
            userconfig.to_str().unwrap(),
            "--otp",
            "654321",
        ]
    );
    assert_eq!(call.working_dir, h.package.path().join("pkg"));
    assert_eq!(h.scratch_entries(), 0);
}

#[tokio::test]
async fn unpublish_without_name_source_fails_without_scope() {
    let h = Harness::with_token(RecordingRunner::succeeding("ok"));

    let response = h
        .server
        .call_tool("npm_unpublish", Some(json!({ "version": "1.0.0" })))
        .await;

    assert!(response.is_error);
    assert!(response.first_text().unwrap().contains("Provide packageName"));
    assert!(h.runner.calls().is_empty());
    assert_eq!(h.scratch_entries(), 0);
}

#[tokio::test]
async fn view_needs_no_token() {
    let h = Harness::new(RecordingRunner::succeeding("{\"latest\":\"1.2.3\"}"), MockEnv::new());

    let response = h
        .server
        .call_tool(
            "npm_view_package",
            Some(json!({
                "packageName": "foo",
                "version": "1.2.3",
                "field": "dist-tags",
                "json": true
            })),
        )
        .await;

    assert!(!response.is_error);
    assert_eq!(response.first_text(), Some("{\"latest\":\"1.2.3\"}"));
    let call = &h.runner.calls()[0];
    assert_eq!(call.args, ["view", "foo@1.2.3", "dist-tags", "--json"]);
    assert_eq!(call.userconfig, None);
    assert_eq!(h.scratch_entries(), 0);
}

#[tokio::test]
async fn view_with_non_object_arguments_uses_base_dir_descriptor() {
    let h = Harness::new(RecordingRunner::succeeding("bar@2.0.0"), MockEnv::new());
    h.write_descriptor(Path::new(""), "bar");

    let response = h.server.call_tool("npm_view_package", Some(json!("bar"))).await;

    assert!(!response.is_error);
    assert_eq!(h.runner.calls()[0].args, ["view", "bar"]);
}

#[tokio::test]
async fn empty_output_gets_placeholder_text() {
    let h = Harness::new(RecordingRunner::succeeding("  \n"), MockEnv::new());

    let response = h
        .server
        .call_tool("npm_view_package", Some(json!({ "packageName": "quiet" })))
        .await;

    assert!(!response.is_error);
    assert_eq!(response.first_text(), Some("Command finished without output."));
}

#[tokio::test]
async fn spawn_failure_is_an_error_result() {
    let runner = RecordingRunner::with_outcome(|invocation| {
        Err(npm_mcp_core::ToolError::Process(format!(
            "Failed to spawn '{}'",
            invocation.program.display()
        )))
    });
    let h = Harness::with_token(runner);

    let response = h.server.call_tool("npm_publish", None).await;

    assert!(response.is_error);
    assert_eq!(response.first_text(), Some(format!("Failed to spawn '{NPM}'").as_str()));
    assert_eq!(h.scratch_entries(), 0);
}

#[tokio::test]
async fn unknown_tool_is_an_error_result() {
    let h = Harness::with_token(RecordingRunner::succeeding("ok"));

    let response = h.server.call_tool("npm_whoami", None).await;

    assert!(response.is_error);
    assert_eq!(response.first_text(), Some("Unknown tool: npm_whoami"));
    assert!(h.runner.calls().is_empty());
}

#[tokio::test]
async fn concurrent_publishes_use_separate_scopes() {
    let h = Harness::with_token(RecordingRunner::succeeding("ok"));

    let (a, b) = tokio::join!(
        h.server.call_tool("npm_publish", Some(json!({ "tag": "a" }))),
        h.server.call_tool("npm_publish", Some(json!({ "tag": "b" }))),
    );

    assert!(!a.is_error && !b.is_error);
    let calls = h.runner.calls();
    assert_eq!(calls.len(), 2);
    assert_ne!(calls[0].userconfig, calls[1].userconfig);
    assert_eq!(h.scratch_entries(), 0);
}
