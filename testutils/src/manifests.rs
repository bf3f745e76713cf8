use std::collections::BTreeMap;

use k8s_openapi::ByteString;
use k8s_openapi::api::apps::v1 as appsv1;
use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;

// These build the same shape of output that `helm template --show-only` produces, so that the
// decoding and validation code can be exercised without a helm binary or a chart checkout.

pub fn test_container(name: &str, image: &str, args: &[&str]) -> corev1::Container {
    corev1::Container {
        name: name.into(),
        image: Some(image.into()),
        args: if args.is_empty() { None } else { Some(args.iter().map(|a| a.to_string()).collect()) },
        ..Default::default()
    }
}

pub fn image_containers(images: &[&str]) -> Vec<corev1::Container> {
    images.iter().enumerate().map(|(i, img)| test_container(&format!("container-{i}"), img, &[])).collect()
}

pub fn rendered_daemonset(template: &str, namespace: &str, containers: Vec<corev1::Container>) -> String {
    let ds = appsv1::DaemonSet {
        metadata: test_metadata("the-daemonset", namespace),
        spec: Some(appsv1::DaemonSetSpec {
            template: pod_template(containers),
            ..Default::default()
        }),
        ..Default::default()
    };
    helm_document(template, &ds)
}

pub fn rendered_deployment(template: &str, namespace: &str, containers: Vec<corev1::Container>) -> String {
    let depl = appsv1::Deployment {
        metadata: test_metadata("the-deployment", namespace),
        spec: Some(appsv1::DeploymentSpec {
            replicas: Some(1),
            template: pod_template(containers),
            ..Default::default()
        }),
        ..Default::default()
    };
    helm_document(template, &depl)
}

pub fn rendered_secret(template: &str, namespace: &str, keys: &[&str]) -> String {
    let secret = corev1::Secret {
        metadata: test_metadata("the-secret", namespace),
        data: Some(keys.iter().map(|k| (k.to_string(), ByteString(b"test".to_vec()))).collect::<BTreeMap<_, _>>()),
        ..Default::default()
    };
    helm_document(template, &secret)
}

pub fn rendered_service_account(template: &str, namespace: &str) -> String {
    let sa = corev1::ServiceAccount {
        metadata: test_metadata("the-service-account", namespace),
        ..Default::default()
    };
    helm_document(template, &sa)
}

fn test_metadata(name: &str, namespace: &str) -> metav1::ObjectMeta {
    metav1::ObjectMeta {
        name: Some(name.into()),
        namespace: Some(namespace.into()),
        ..Default::default()
    }
}

fn pod_template(containers: Vec<corev1::Container>) -> corev1::PodTemplateSpec {
    corev1::PodTemplateSpec {
        metadata: None,
        spec: Some(corev1::PodSpec { containers, ..Default::default() }),
    }
}

fn helm_document<K: serde::Serialize>(template: &str, obj: &K) -> String {
    format!("---\n# Source: chart/{template}\n{}", serde_yaml::to_string(obj).unwrap())
}
